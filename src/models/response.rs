use serde::{Deserialize, Serialize};

pub const SEND_FAILED: &str = "Falha ao enviar e-mail";
pub const INVALID_BODY: &str = "Corpo da requisição inválido";

/// JSON answer of the form endpoints: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FormResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl FormResponse {
    pub fn success() -> Self {
        FormResponse {
            ok: true,
            error: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        FormResponse {
            ok: false,
            error: Some(message.to_string()),
        }
    }
}
