// src/models/service_orders.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        forms::{blank_to_none, blank_uuid, not_blank, patch_optional},
    },
    models::{clients::ClientOption, equipment::EquipmentOption, technicians::TechnicianOption},
};

// =========================================================================
//  STATUS E BADGES
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "os_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    InProgress,
    AwaitingPart,
    Completed,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::InProgress,
        OrderStatus::AwaitingPart,
        OrderStatus::Completed,
        OrderStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::InProgress => "in_progress",
            OrderStatus::AwaitingPart => "awaiting_part",
            OrderStatus::Completed => "completed",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Ainda na bancada (conta como "em aberto" no dashboard).
    pub fn is_open(self) -> bool {
        matches!(self, OrderStatus::InProgress | OrderStatus::AwaitingPart)
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(AppError::InvalidValue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }
}

/// Rótulo e classe CSS exibidos para um status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Badge {
    pub label: String,
    pub style: String,
}

impl Badge {
    fn new(label: &str, style: &str) -> Self {
        Self { label: label.to_string(), style: style.to_string() }
    }
}

/// Badge de um valor de status de OS. Valores desconhecidos aparecem crus,
/// com o estilo genérico `outline`.
pub fn status_badge(value: &str) -> Badge {
    match value {
        "in_progress" => Badge::new("Em andamento", "status-in-progress"),
        "awaiting_part" => Badge::new("Aguardando peça", "status-waiting"),
        "completed" => Badge::new("Finalizado", "status-completed"),
        "delivered" => Badge::new("Entregue", "status-delivered"),
        other => Badge::new(other, "outline"),
    }
}

pub fn payment_badge(value: &str) -> Badge {
    match value {
        "pending" => Badge::new("Pendente", "status-pending"),
        "paid" => Badge::new("Pago", "status-completed"),
        other => Badge::new(other, "outline"),
    }
}

// =========================================================================
//  ORDEM DE SERVIÇO
// =========================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub client_id: Uuid,
    pub equipment_id: Uuid,
    pub technician_id: Uuid,
    pub problem_description: String,
    pub solution_description: Option<String>,
    #[schema(value_type = Option<f64>, example = 150.5)]
    pub value: Option<Decimal>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceOrder {
    pub fn number(&self) -> String {
        order_number(self.id)
    }
}

/// Linha do JOIN de listagem/detalhe (colunas planas vindas do banco).
#[derive(Debug, Clone, FromRow)]
pub struct ServiceOrderRow {
    #[sqlx(flatten)]
    pub order: ServiceOrder,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub client_address: Option<String>,
    pub equipment_type: String,
    pub equipment_brand: Option<String>,
    pub equipment_model: Option<String>,
    pub equipment_serial_number: Option<String>,
    pub technician_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderClient {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderEquipment {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

/// OS com os dados relacionados, no formato consumido pelas telas.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderDetail {
    #[serde(flatten)]
    pub order: ServiceOrder,
    pub number: String,
    pub status_badge: Badge,
    pub payment_badge: Badge,
    pub client: OrderClient,
    pub equipment: OrderEquipment,
    pub technician: TechnicianOption,
}

impl From<ServiceOrderRow> for ServiceOrderDetail {
    fn from(row: ServiceOrderRow) -> Self {
        let client = OrderClient {
            id: row.order.client_id,
            name: row.client_name,
            phone: row.client_phone,
            email: row.client_email,
            address: row.client_address,
        };
        let equipment = OrderEquipment {
            id: row.order.equipment_id,
            equipment_type: row.equipment_type,
            brand: row.equipment_brand,
            model: row.equipment_model,
            serial_number: row.equipment_serial_number,
        };
        let technician = TechnicianOption {
            id: row.order.technician_id,
            name: row.technician_name,
        };

        Self {
            number: row.order.number(),
            status_badge: status_badge(row.order.status.as_str()),
            payment_badge: payment_badge(row.order.payment_status.as_str()),
            order: row.order,
            client,
            equipment,
            technician,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "snake_case")]
#[into_params(parameter_in = Query)]
pub struct OrderFilter {
    /// Ausente = todos os status
    pub status: Option<OrderStatus>,
    pub client_id: Option<Uuid>,
}

impl OrderFilter {
    pub fn matches(&self, order: &ServiceOrder) -> bool {
        self.status.is_none_or(|s| order.status == s)
            && self.client_id.is_none_or(|c| order.client_id == c)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "snake_case")]
#[into_params(parameter_in = Query)]
pub struct FormOptionsQuery {
    pub client_id: Option<Uuid>,
}

/// Listas dependentes do formulário de nova OS.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub clients: Vec<ClientOption>,
    pub equipment: Vec<EquipmentOption>,
    pub technicians: Vec<TechnicianOption>,
}

// =========================================================================
//  PAYLOADS
// =========================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceOrderPayload {
    #[serde(default, deserialize_with = "blank_uuid")]
    #[validate(required(message = "required"))]
    pub client_id: Option<Uuid>,

    #[serde(default, deserialize_with = "blank_uuid")]
    #[validate(required(message = "required"))]
    pub equipment_id: Option<Uuid>,

    #[serde(default, deserialize_with = "blank_uuid")]
    #[validate(required(message = "required"))]
    pub technician_id: Option<Uuid>,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Não liga")]
    pub problem_description: String,

    pub solution_description: Option<String>,

    /// Número ou texto ("150,50"); vazio = sem valor
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "150.50")]
    pub value: Option<Value>,

    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceOrderPayload {
    pub client_id: Option<Uuid>,
    pub equipment_id: Option<Uuid>,
    pub technician_id: Option<Uuid>,

    #[validate(custom(function = "not_blank"))]
    pub problem_description: Option<String>,

    pub solution_description: Option<String>,

    /// `null` ou texto vazio limpa o valor
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "150.50")]
    pub value: Option<Value>,

    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

// Distingue campo ausente (None) de `null` explícito (Some(Value::Null)).
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Teto (exclusivo) da coluna `NUMERIC(12, 2)`, em reais.
const MAX_VALUE: i64 = 10_000_000_000;

/// Interpreta o valor monetário do formulário: número ou texto numérico
/// (vírgula aceita), vazio/nulo = sem valor, negativo ou acima do teto é
/// inválido.
pub fn parse_value(raw: Option<&Value>) -> Result<Option<Decimal>, AppError> {
    let text = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => match blank_to_none(Some(s.clone())) {
            Some(s) => s.replace(',', "."),
            None => return Ok(None),
        },
        Some(_) => return Err(AppError::InvalidValue),
    };

    let value = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| AppError::InvalidValue)?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::InvalidValue);
    }
    let value = value.round_dp(2);
    if value >= Decimal::from(MAX_VALUE) {
        return Err(AppError::InvalidValue);
    }
    Ok(Some(value))
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceOrder {
    pub client_id: Uuid,
    pub equipment_id: Uuid,
    pub technician_id: Uuid,
    pub problem_description: String,
    pub solution_description: Option<String>,
    pub value: Option<Decimal>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
}

impl NewServiceOrder {
    /// Só chamar depois de `validate()`: os ids obrigatórios já foram checados.
    pub fn from_payload(payload: CreateServiceOrderPayload) -> Result<Self, AppError> {
        let (Some(client_id), Some(equipment_id), Some(technician_id)) =
            (payload.client_id, payload.equipment_id, payload.technician_id)
        else {
            return Err(AppError::ValidationError(validator::ValidationErrors::new()));
        };

        Ok(Self {
            client_id,
            equipment_id,
            technician_id,
            problem_description: payload.problem_description.trim().to_string(),
            solution_description: blank_to_none(payload.solution_description),
            value: parse_value(payload.value.as_ref())?,
            status: payload.status.unwrap_or(OrderStatus::InProgress),
            payment_status: payload.payment_status.unwrap_or(PaymentStatus::Pending),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceOrderPatch {
    pub client_id: Option<Uuid>,
    pub equipment_id: Option<Uuid>,
    pub technician_id: Option<Uuid>,
    pub problem_description: Option<String>,
    pub solution_description: Option<Option<String>>,
    pub value: Option<Option<Decimal>>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl ServiceOrderPatch {
    pub fn from_payload(payload: UpdateServiceOrderPayload) -> Result<Self, AppError> {
        let value = match payload.value {
            Some(raw) => Some(parse_value(Some(&raw))?),
            None => None,
        };

        Ok(Self {
            client_id: payload.client_id,
            equipment_id: payload.equipment_id,
            technician_id: payload.technician_id,
            problem_description: payload.problem_description.map(|p| p.trim().to_string()),
            solution_description: patch_optional(payload.solution_description),
            value,
            status: payload.status,
            payment_status: payload.payment_status,
        })
    }

    /// Mexe em alguma referência (cliente, equipamento ou técnico)?
    pub fn touches_references(&self) -> bool {
        self.client_id.is_some() || self.equipment_id.is_some() || self.technician_id.is_some()
    }
}

// =========================================================================
//  FORMATAÇÃO
// =========================================================================

/// Número exibido da OS: `#` + os 8 últimos caracteres do id.
pub fn order_number(id: Uuid) -> String {
    let id = id.to_string();
    format!("#{}", &id[id.len() - 8..])
}

pub fn format_money(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("R$ {:.2}", v),
        None => "Não informado".to_string(),
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn badge_mapping_is_total() {
        let cases = [
            ("in_progress", "Em andamento", "status-in-progress"),
            ("awaiting_part", "Aguardando peça", "status-waiting"),
            ("completed", "Finalizado", "status-completed"),
            ("delivered", "Entregue", "status-delivered"),
        ];
        for (value, label, style) in cases {
            assert_eq!(status_badge(value), Badge::new(label, style));
        }
        assert_eq!(payment_badge("pending"), Badge::new("Pendente", "status-pending"));
        assert_eq!(payment_badge("paid"), Badge::new("Pago", "status-completed"));

        assert_eq!(status_badge("cancelado"), Badge::new("cancelado", "outline"));
        assert_eq!(payment_badge(""), Badge::new("", "outline"));
    }

    #[test]
    fn every_status_has_a_specific_badge() {
        for status in OrderStatus::ALL {
            assert_ne!(status_badge(status.as_str()).style, "outline");
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("all".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn value_accepts_numbers_and_strings() {
        assert_eq!(parse_value(Some(&json!(150.5))).unwrap(), Some(Decimal::new(15050, 2)));
        assert_eq!(parse_value(Some(&json!("150,50"))).unwrap(), Some(Decimal::new(15050, 2)));
        assert_eq!(parse_value(Some(&json!(" 80 "))).unwrap(), Some(Decimal::from(80)));
        assert_eq!(parse_value(Some(&json!(""))).unwrap(), None);
        assert_eq!(parse_value(Some(&Value::Null)).unwrap(), None);
        assert_eq!(parse_value(None).unwrap(), None);
    }

    #[test]
    fn value_rejects_garbage_and_negatives() {
        assert!(matches!(parse_value(Some(&json!("abc"))), Err(AppError::InvalidValue)));
        assert!(matches!(parse_value(Some(&json!(-1))), Err(AppError::InvalidValue)));
        assert!(matches!(parse_value(Some(&json!([1]))), Err(AppError::InvalidValue)));
    }

    #[test]
    fn value_must_fit_the_money_column() {
        assert_eq!(
            parse_value(Some(&json!("9999999999,99"))).unwrap(),
            Some(Decimal::new(999_999_999_999, 2))
        );
        assert!(matches!(parse_value(Some(&json!("100000000000"))), Err(AppError::InvalidValue)));
        assert!(matches!(parse_value(Some(&json!(9999999999.999))), Err(AppError::InvalidValue)));
    }

    #[test]
    fn create_payload_requires_references_and_problem() {
        let payload: CreateServiceOrderPayload = serde_json::from_value(json!({
            "clientId": Uuid::new_v4(),
            "problemDescription": "   "
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        // equipamento, técnico e problema
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn patch_distinguishes_missing_and_null_value() {
        let untouched: UpdateServiceOrderPayload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(ServiceOrderPatch::from_payload(untouched).unwrap().value, None);

        let cleared: UpdateServiceOrderPayload =
            serde_json::from_value(json!({ "value": null })).unwrap();
        assert_eq!(ServiceOrderPatch::from_payload(cleared).unwrap().value, Some(None));
    }

    #[test]
    fn formatting_helpers() {
        let id = Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").unwrap();
        assert_eq!(order_number(id), "#14174000");
        assert_eq!(format_money(Some(Decimal::new(1505, 1))), "R$ 150.50");
        assert_eq!(format_money(None), "Não informado");
        let date = DateTime::parse_from_rfc3339("2025-03-07T10:00:00Z").unwrap().to_utc();
        assert_eq!(format_date(date), "07/03/2025");
    }
}
