//! Construção dos prompts enviados ao modelo.
//!
//! Todos os prompts pedem explicitamente JSON válido sem texto extra;
//! ainda assim o parsing tolera prosa ao redor do objeto (ver
//! [`coerce_json`](crate::gemini::coerce_json)).

use crate::job::ResumeFeedback;

pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Análise geral de currículo: boas práticas, sem vaga alvo.
pub fn resume_general(language: &str) -> String {
    format!(
        "ANÁLISE RÁPIDA DE CURRÍCULO - Seja CONCISO e DIRETO.\n\
         Idioma: {language}\n\
         Analise o currículo anexo com foco em boas práticas.\n\
         Retorne JSON com:\n\
         1. summary: resumo (máx. 2 parágrafos)\n\
         2. totalScore: score total (0-100)\n\
         3. scores: structure, experience, skills, format, impact (0-100)\n\
         4. strengths: pontos fortes (máx. 3)\n\
         5. improvements: melhorias (máx. 4)\n\
         6. resources: 2 recursos úteis ({{title, url}})"
    )
}

/// Análise de adequação do currículo a uma vaga específica.
pub fn resume_adequation(language: &str, position: &str, job_description: &str) -> String {
    format!(
        "ANÁLISE RÁPIDA DE ADEQUAÇÃO - Seja CONCISO e DIRETO.\n\
         Idioma: {language}\n\
         Cargo: {position}\n\
         Vaga: {job_description}\n\
         Analise o currículo anexo e retorne JSON com:\n\
         1. summary: resumo (máx. 2 parágrafos)\n\
         2. adequationScore: adequação à vaga (0-100)\n\
         3. totalScore: score total (0-100)\n\
         4. scores: structure, experience, fit, skills, format (0-100)\n\
         5. strengths: pontos fortes (máx. 3)\n\
         6. improvements: melhorias (máx. 4)\n\
         7. resources: 2 recursos úteis ({{title, url}})\n\
         8. skillsRadar: radar de skills (máx. 6 itens, {{skill, requiredScore, resumeScore}})"
    )
}

/// Geração de um novo currículo a partir da análise já concluída.
pub fn cv_from_analysis(language: &str, feedbacks: &ResumeFeedback) -> String {
    let analysis = serde_json::to_string(feedbacks).unwrap_or_default();
    format!(
        "GERAÇÃO DE NOVO CURRÍCULO - Com base na análise anterior\n\
         Idioma: {language}\n\
         Análise anterior: {analysis}\n\
         {}",
        cv_structure(language)
    )
}

/// Análise de perfil LinkedIn sobre o payload já reduzido.
pub fn linkedin_analysis(language: &str, profile_json: &str) -> String {
    format!(
        "Você é um especialista em RH focado em LinkedIn.\n\
         Responda na língua {language}.\n\
         Analise o perfil que tem esses dados: {profile_json}\n\
         Faça a análise desses itens: name, headline, about, experience, education, \
         skills, languages, courses, profilePicture, recommendationsReceived, \
         recommendationsGiven. Traduza os itens para o idioma {language} com a \
         primeira letra maiúscula.\n\
         Retorne JSON com: overallScore (0-100); items (lista de {{item, score, \
         weight, weightedScore, feedback, suggestions: [{{text, impact}}], \
         priority}}, scores 0-100, pesos 0-1, priority/impact em high|medium|low); \
         missingSections; generalRecommendations; quickWins; strategicChanges."
    )
}

/// Geração de currículo a partir de uma descrição profissional livre.
pub fn cv_from_description(language: &str, description: &str) -> String {
    format!(
        "GERAR CURRÍCULO A PARTIR DE DESCRIÇÃO PROFISSIONAL\n\
         Descrição fornecida:\n\
         \"\"\"\n{description}\n\"\"\"\n\
         {}\n\
         Enriqueça com resultados quantificáveis plausíveis quando não explícitos.\n\
         Resumo profissional: forte, direto, focado em valor entregue.",
        cv_structure(language)
    )
}

/// Otimização do currículo atual para uma vaga alvo.
pub fn cv_for_job(
    language: &str,
    current_profile: &str,
    job_description: &str,
    position: &str,
) -> String {
    format!(
        "OTIMIZAÇÃO DE CURRÍCULO PARA UMA VAGA\n\
         Cargo alvo: {position}\n\
         Descrição da vaga:\n\
         \"\"\"\n{job_description}\n\"\"\"\n\
         Perfil/CV atual do candidato:\n\
         \"\"\"\n{current_profile}\n\"\"\"\n\
         Objetivo: gerar um currículo otimizado para esta vaga, destacando \
         alinhamento e palavras-chave relevantes, sem fabricar experiências \
         não mencionadas.\n\
         {}\n\
         Adapte a terminologia à vaga, reescrevendo bullets com verbo de ação \
         e resultado quantificável quando possível.",
        cv_structure(language)
    )
}

// Estrutura JSON obrigatória compartilhada por todas as gerações de CV.
fn cv_structure(language: &str) -> String {
    format!(
        "Idioma de saída: {language}\n\
         Formate apenas JSON válido, sem comentários ou texto extra.\n\
         Estrutura obrigatória:\n\
         {{\n\
           \"personalInfo\": {{ \"name\": \"\", \"email\": \"\", \"phone\": \"\", \"location\": \"\", \"linkedin\": \"\", \"portfolio\": \"\" }},\n\
           \"professionalSummary\": \"\",\n\
           \"experience\": [{{ \"title\": \"\", \"company\": \"\", \"period\": \"\", \"description\": \"\", \"achievements\": [\"...\"] }}],\n\
           \"education\": [{{ \"degree\": \"\", \"institution\": \"\", \"period\": \"\", \"details\": \"\" }}],\n\
           \"skills\": {{ \"technical\": [\"...\"], \"soft\": [\"...\"] }},\n\
           \"languages\": [{{ \"language\": \"\", \"level\": \"\" }}],\n\
           \"certifications\": [{{ \"name\": \"\", \"issuer\": \"\", \"date\": \"\" }}]\n\
         }}\n\
         Retorne campos vazios com string vazia ou arrays vazios se não houver dados."
    )
}
