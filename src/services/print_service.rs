// src/services/print_service.rs
//
// Documento de impressão da OS: HTML autocontido (CSS inline, sem recursos
// externos). Todo texto vindo do banco passa por `escape_html`.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::service_orders::{ServiceOrderDetail, format_date, format_money};

const NOT_INFORMED: &str = "Não informado";

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; color: #333; }
    .header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #333; padding-bottom: 20px; }
    .os-number { font-size: 24px; font-weight: bold; color: #2563eb; }
    .section { margin: 20px 0; padding: 15px; border: 1px solid #ddd; border-radius: 5px; }
    .section-title { font-weight: bold; font-size: 16px; margin-bottom: 10px; color: #2563eb; border-bottom: 1px solid #eee; padding-bottom: 5px; }
    .field { margin: 8px 0; }
    .field strong { min-width: 120px; display: inline-block; }
    .status { display: inline-block; padding: 4px 8px; border-radius: 4px; font-size: 12px; font-weight: bold; }
    .status-completed { background: #dcfce7; color: #166534; }
    .status-delivered { background: #e0e7ff; color: #3730a3; }
    .status-pending { background: #fef3c7; color: #92400e; }
    .status-in-progress { background: #dbeafe; color: #1e40af; }
    .status-waiting { background: #fde68a; color: #b45309; }
    .outline { border: 1px solid #999; }
    .footer { margin-top: 40px; text-align: center; font-size: 12px; color: #666; }
"#;

// Abre o diálogo de impressão e fecha a janela depois
const PRINT_SCRIPT: &str = r#"
    window.onload = function() {
        window.print();
        window.onafterprint = function() { window.close(); };
    };
"#;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn or_not_informed(value: Option<&str>) -> String {
    escape_html(value.unwrap_or(NOT_INFORMED))
}

fn field(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(html, r#"<div class="field"><strong>{label}:</strong> {value}</div>"#);
}

fn section(html: &mut String, title: &str, body: impl FnOnce(&mut String)) {
    let _ = writeln!(html, r#"<div class="section"><div class="section-title">{title}</div>"#);
    body(html);
    html.push_str("</div>\n");
}

pub fn render_order(detail: &ServiceOrderDetail, printed_at: DateTime<Utc>) -> String {
    let order = &detail.order;
    let number = escape_html(&detail.number);
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Ordem de Serviço {number}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"header\"><h1>ORDEM DE SERVIÇO</h1><div class=\"os-number\">{number}</div></div>\n"
    );

    section(&mut html, "DADOS DO CLIENTE", |html| {
        let client = &detail.client;
        field(html, "Nome", &escape_html(&client.name));
        field(html, "Telefone", &or_not_informed(client.phone.as_deref()));
        field(html, "E-mail", &or_not_informed(client.email.as_deref()));
        field(html, "Endereço", &or_not_informed(client.address.as_deref()));
    });

    section(&mut html, "DADOS DO EQUIPAMENTO", |html| {
        let equipment = &detail.equipment;
        field(html, "Tipo", &escape_html(&equipment.equipment_type));
        field(html, "Marca", &or_not_informed(equipment.brand.as_deref()));
        field(html, "Modelo", &or_not_informed(equipment.model.as_deref()));
        field(html, "Nº Série", &or_not_informed(equipment.serial_number.as_deref()));
    });

    section(&mut html, "DESCRIÇÃO DO PROBLEMA", |html| {
        let _ = writeln!(html, "<div>{}</div>", escape_html(&order.problem_description));
    });

    if let Some(solution) = &order.solution_description {
        section(&mut html, "SOLUÇÃO APLICADA", |html| {
            let _ = writeln!(html, "<div>{}</div>", escape_html(solution));
        });
    }

    section(&mut html, "INFORMAÇÕES DA OS", |html| {
        let badge = |label: &str, style: &str| {
            format!(r#"<span class="status {}">{}</span>"#, escape_html(style), escape_html(label))
        };
        field(html, "Status", &badge(&detail.status_badge.label, &detail.status_badge.style));
        field(html, "Pagamento", &badge(&detail.payment_badge.label, &detail.payment_badge.style));
        field(html, "Valor", &escape_html(&format_money(order.value)));
        field(html, "Técnico", &escape_html(&detail.technician.name));
        field(html, "Data Criação", &format_date(order.created_at));
    });

    let _ = write!(
        html,
        "<div class=\"footer\">\n<p>Este documento foi gerado automaticamente pelo sistema</p>\n\
         <p>Data de impressão: {}</p>\n</div>\n<script>{PRINT_SCRIPT}</script>\n</body>\n</html>\n",
        printed_at.format("%d/%m/%Y %H:%M:%S")
    );

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::service_orders::{ServiceOrderRow, ServiceOrderDetail},
        services::fixtures,
    };
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn detail() -> ServiceOrderDetail {
        let mut order = fixtures::order(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        order.problem_description = "<script>alert('x')</script>".into();
        order.value = Some(Decimal::new(15050, 2));
        ServiceOrderDetail::from(ServiceOrderRow {
            order,
            client_name: "Ana & Filhos".into(),
            client_phone: Some("11999999999".into()),
            client_email: None,
            client_address: None,
            equipment_type: "Notebook".into(),
            equipment_brand: Some("Dell".into()),
            equipment_model: None,
            equipment_serial_number: None,
            technician_name: "Carlos".into(),
        })
    }

    #[test]
    fn interpolated_fields_are_escaped() {
        let html = render_order(&detail(), Utc::now());
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("Ana &amp; Filhos"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn document_carries_order_data_and_print_script() {
        let detail = detail();
        let html = render_order(&detail, Utc::now());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(&detail.number));
        assert!(html.contains("R$ 150.50"));
        assert!(html.contains("Em andamento"));
        assert!(html.contains("status-in-progress"));
        assert!(html.contains("<strong>E-mail:</strong> Não informado"));
        assert!(html.contains("window.print()"));
        assert!(!html.contains("SOLUÇÃO APLICADA"));
        assert!(!html.contains("http"));
    }
}
