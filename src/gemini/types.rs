//! Tipos de dados para requisições e respostas da API Gemini.
//!
//! Todas as structs derivam `Serialize` e `Deserialize` para conversão JSON
//! conforme o formato esperado pelo endpoint `generateContent` da API
//! Generative Language do Google.

use serde::{Deserialize, Serialize};

/// Corpo da requisição para o endpoint `models/{model}:generateContent`.
///
/// Contém o conteúdo da conversa (texto e anexos inline) e a configuração
/// de geração (temperatura, limite de tokens, formato da resposta).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conteúdos da conversa, normalmente uma única entrada "user".
    pub contents: Vec<Content>,
    /// Configuração de geração aplicada à chamada.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Uma entrada da conversa com o modelo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Papel do remetente: "user" ou "model".
    pub role: String,
    /// Partes que compõem a entrada (texto e/ou dados inline).
    pub parts: Vec<Part>,
}

/// Uma parte de conteúdo: texto ou um anexo binário em base64.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Part {
    /// Trecho de texto (o prompt).
    #[serde(rename = "text")]
    Text(String),
    /// Anexo binário inline, serializado como `inlineData` no JSON.
    #[serde(rename = "inlineData")]
    InlineData(InlineData),
}

/// Dados binários inline com o mime type declarado.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Mime type do anexo (ex.: "application/pdf").
    pub mime_type: String,
    /// Conteúdo codificado em base64.
    pub data: String,
}

/// Configuração de geração enviada na requisição.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Temperatura de amostragem (0.0 a 2.0).
    pub temperature: f32,
    /// Número máximo de tokens na resposta.
    pub max_output_tokens: u32,
    /// Mime type pedido para a resposta ("application/json").
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 3000,
            response_mime_type: "application/json".to_string(),
        }
    }
}

impl GenerateContentRequest {
    /// Monta uma requisição de turno único com um prompt de texto e um
    /// anexo inline opcional, usando a configuração de geração padrão.
    pub fn user_prompt(prompt: &str, attachment: Option<InlineData>) -> Self {
        let mut parts = vec![Part::Text(prompt.to_string())];
        if let Some(data) = attachment {
            parts.push(Part::InlineData(data));
        }
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: Some(GenerationConfig::default()),
        }
    }
}

/// Resposta do endpoint `generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidatos gerados (normalmente um).
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Estatísticas de uso de tokens, quando presentes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

/// Um candidato de resposta do modelo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Conteúdo gerado pelo modelo.
    pub content: Content,
    /// Motivo da parada ("STOP", "MAX_TOKENS"). `None` se ausente.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Estatísticas de consumo de tokens para uma chamada.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatena o texto de todas as partes do primeiro candidato.
    /// Retorna string vazia se não houver candidatos.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| match p {
                        Part::Text(t) => Some(t.as_str()),
                        Part::InlineData(_) => None,
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}
