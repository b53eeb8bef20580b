use megagen_quote::{NewQuote, Quote, QuoteBoard, Stage, quote_code};

pub fn quote(id: u64, client: &str, stage: Stage) -> Quote {
    Quote {
        id,
        code: quote_code(id),
        client: client.to_owned(),
        summary: "Implantes AnyRidge x10".to_owned(),
        address: "Av. Providencia 1234, Santiago".to_owned(),
        comments: String::new(),
        total: "$1.250.000".to_owned(),
        stage,
        history: vec![],
        scheduled_delivery: None,
        files: vec![],
    }
}

/// Board seeded with quotes 307..=309, newest first.
#[allow(dead_code)]
pub fn seeded_board() -> QuoteBoard {
    QuoteBoard::new(vec![
        quote(309, "Clínica Dental Sur", Stage::CotizacionConfirmada),
        quote(308, "Centro Médico Norte", Stage::Transito),
        quote(307, "Odontología Integral", Stage::Entregado),
    ])
}

#[allow(dead_code)]
pub fn new_quote(client: &str, total: &str) -> NewQuote {
    NewQuote {
        client: client.to_owned(),
        total: total.to_owned(),
        ..Default::default()
    }
}
