use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A form kind that can be relayed as a plain-text email.
pub trait Submission: DeserializeOwned + Default {
    /// Subject of the notification email.
    const SUBJECT: &'static str;
    /// Short name used in logs.
    const KIND: &'static str;

    /// Renders every known field in a fixed order, empty when absent.
    fn render(&self) -> String;
}

/// Ficha cadastral sent from the "cadastro" tab.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct RegistrationSubmission {
    #[serde(default, deserialize_with = "lenient")]
    pub nome_completo: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cpf: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rg: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub data_nascimento: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub telefone: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub endereco: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub estado: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub instituicao_formacao: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ano_conclusao: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tempo_experiencia: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub observacoes: Option<String>,
}

/// Message sent from the "contato" tab.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "lenient")]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub assunto: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub mensagem: Option<String>,
}

impl Submission for RegistrationSubmission {
    const SUBJECT: &'static str = "Cadastro ANIC - Ficha Cadastral";
    const KIND: &'static str = "cadastro";

    fn render(&self) -> String {
        [
            "Nova Ficha Cadastral enviada:".to_string(),
            line("Nome Completo", &self.nome_completo),
            line("CPF", &self.cpf),
            line("RG", &self.rg),
            line("Data de Nascimento", &self.data_nascimento),
            line("E-mail", &self.email),
            line("Telefone", &self.telefone),
            line("Endereço", &self.endereco),
            line("Estado", &self.estado),
            line("Instituição de Formação", &self.instituicao_formacao),
            line("Ano de Conclusão", &self.ano_conclusao),
            line("Tempo de Experiência", &self.tempo_experiencia),
            line("Observações", &self.observacoes),
        ]
        .join("\n")
    }
}

impl Submission for ContactSubmission {
    const SUBJECT: &'static str = "Contato ANIC - Mensagem";
    const KIND: &'static str = "contato";

    fn render(&self) -> String {
        [
            "Nova mensagem de contato:".to_string(),
            line("Nome", &self.nome),
            line("E-mail", &self.email),
            line("Assunto", &self.assunto),
            "Mensagem:".to_string(),
            value(&self.mensagem).to_string(),
        ]
        .join("\n")
    }
}

fn line(label: &str, field: &Option<String>) -> String {
    format!("{}: {}", label, value(field))
}

fn value(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or_default()
}

// Falsy JSON values (`null`, `false`, `0`) count as absent, anything else keeps its text.
fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(text_of(&other)),
    })
}

/// Arrays are flattened to their items joined with `,`.
fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(text_of).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_renders_present_fields_and_blanks() {
        let submission = RegistrationSubmission {
            nome_completo: Some("Maria Silva".to_string()),
            cpf: Some("123.456.789-00".to_string()),
            ..Default::default()
        };

        let body = submission.render();

        assert!(body.starts_with(
            "Nova Ficha Cadastral enviada:\nNome Completo: Maria Silva\nCPF: 123.456.789-00\nRG: \n"
        ));
        assert!(body.ends_with("\nObservações: "));
    }

    #[test]
    fn empty_registration_has_one_line_per_field() {
        let body = RegistrationSubmission::default().render();

        assert_eq!(
            body,
            "Nova Ficha Cadastral enviada:\n\
             Nome Completo: \n\
             CPF: \n\
             RG: \n\
             Data de Nascimento: \n\
             E-mail: \n\
             Telefone: \n\
             Endereço: \n\
             Estado: \n\
             Instituição de Formação: \n\
             Ano de Conclusão: \n\
             Tempo de Experiência: \n\
             Observações: "
        );
    }

    #[test]
    fn contact_renders_message_on_its_own_line() {
        let submission = ContactSubmission {
            nome: Some("João".to_string()),
            email: Some("j@x.com".to_string()),
            assunto: Some("outros".to_string()),
            mensagem: Some("Olá".to_string()),
        };

        assert_eq!(
            submission.render(),
            "Nova mensagem de contato:\nNome: João\nE-mail: j@x.com\nAssunto: outros\nMensagem:\nOlá"
        );
    }

    #[test]
    fn empty_contact_keeps_layout() {
        assert_eq!(
            ContactSubmission::default().render(),
            "Nova mensagem de contato:\nNome: \nE-mail: \nAssunto: \nMensagem:\n"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let submission: ContactSubmission =
            serde_json::from_str(r#"{"nome":"Ana","mensagem":"Oi"}"#).unwrap();

        assert_eq!(submission.render(), submission.clone().render());
    }

    #[test]
    fn json_scalars_and_nulls_are_lenient() {
        let submission: RegistrationSubmission = serde_json::from_str(
            r#"{"ano_conclusao": 2015, "tempo_experiencia": null, "estado": "DF", "extra": [1]}"#,
        )
        .unwrap();

        assert_eq!(submission.ano_conclusao.as_deref(), Some("2015"));
        assert_eq!(submission.tempo_experiencia, None);
        assert_eq!(submission.estado.as_deref(), Some("DF"));
    }

    #[test]
    fn falsy_json_values_render_empty() {
        let submission: ContactSubmission = serde_json::from_str(
            r#"{"nome": 0, "email": false, "assunto": ["a", "b", null], "mensagem": true}"#,
        )
        .unwrap();

        assert_eq!(
            submission.render(),
            "Nova mensagem de contato:\nNome: \nE-mail: \nAssunto: a,b,\nMensagem:\ntrue"
        );
    }

    #[test]
    fn form_values_deserialize_as_strings() {
        let submission: ContactSubmission =
            serde_urlencoded::from_str("nome=Jo%C3%A3o&assunto=outros&mensagem=Ol%C3%A1+mundo")
                .unwrap();

        assert_eq!(submission.nome.as_deref(), Some("João"));
        assert_eq!(submission.assunto.as_deref(), Some("outros"));
        assert_eq!(submission.mensagem.as_deref(), Some("Olá mundo"));
        assert_eq!(submission.email, None);
    }
}
