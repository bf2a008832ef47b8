//! Interface de linha de comando do CVLAB baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (run, demo)
//! e a flag global --verbose.

use clap::{Parser, Subcommand};

/// CVLAB — Backend de análise de currículos com IA generativa.
#[derive(Debug, Parser)]
#[command(name = "cvlab", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Processa um job de análise de currículo lido de um arquivo JSON.
    Run {
        /// Caminho para o arquivo JSON com o documento do job.
        file: String,

        /// Saldo inicial de créditos da conta do usuário do job.
        #[arg(long, default_value_t = 10)]
        credits: i64,
    },

    /// Executa a demonstração embutida com um modelo simulado (sem chave de API).
    Demo,
}
