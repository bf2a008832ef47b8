//! Configuração do CVLAB carregada a partir de `cvlab.toml`.
//!
//! Campos ausentes no arquivo recebem defaults; a variável de ambiente
//! `GEMINI_API_KEY` tem precedência sobre a chave do arquivo.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Configuração de nível superior carregada de `cvlab.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CvlabConfig {
    /// Chave da API Gemini.
    #[serde(default)]
    pub api_key: String,

    /// Identificador do modelo generativo.
    #[serde(default = "default_model")]
    pub model: String,
}

// Valor padrão do modelo: "gemini-1.5-pro".
fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}

impl Default for CvlabConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
        }
    }
}

impl CvlabConfig {
    /// Carrega a configuração de `cvlab.toml` no diretório atual;
    /// arquivo inexistente não é erro.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("cvlab.toml"))
    }

    /// Carrega a configuração de um caminho específico.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<CvlabConfig>(&contents)?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var("GEMINI_API_KEY")
            && !key.is_empty()
        {
            config.api_key = key;
        }

        Ok(config)
    }
}
