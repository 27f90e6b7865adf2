//! Presentation-time localization.
//!
//! Internal identifiers stay English (`active`, `blocked`, `generating`);
//! only what a person reads is translated here.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};
use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};

use crate::backend::UserStatus;
use crate::error::{ApiError, Entity, InvalidInput};
use crate::videos::VideoStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pt,
    En,
}

impl Locale {
    /// First supported language in an `Accept-Language` value, in order.
    pub fn from_accept_language(header: &str) -> Self {
        header
            .split(',')
            .filter_map(|part| part.split(';').next())
            .map(|tag| tag.trim().to_ascii_lowercase())
            .find_map(|tag| {
                if tag.starts_with("pt") {
                    Some(Locale::Pt)
                } else if tag.starts_with("en") {
                    Some(Locale::En)
                } else {
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn user_status(self, status: UserStatus) -> &'static str {
        match (self, status) {
            (Locale::Pt, UserStatus::Active) => "Ativo",
            (Locale::Pt, UserStatus::Blocked) => "Bloqueado",
            (Locale::En, UserStatus::Active) => "Active",
            (Locale::En, UserStatus::Blocked) => "Blocked",
        }
    }

    pub fn video_status(self, status: VideoStatus) -> &'static str {
        match (self, status) {
            (Locale::Pt, VideoStatus::Generating) => "Gerando...",
            (Locale::Pt, VideoStatus::Done) => "Concluído",
            (Locale::En, VideoStatus::Generating) => "Generating...",
            (Locale::En, VideoStatus::Done) => "Done",
        }
    }

    /// Short calendar date as the dashboard shows it.
    pub fn date(self, at: OffsetDateTime) -> String {
        let formatted = match self {
            Locale::Pt => at.format(format_description!("[day]/[month]/[year]")),
            Locale::En => at.format(format_description!("[month]/[day]/[year]")),
        };
        formatted.unwrap_or_default()
    }

    pub fn error_message(self, error: &ApiError) -> String {
        match self {
            Locale::En => match error {
                ApiError::Internal(_) => "An internal error occurred.".to_string(),
                other => other.to_string(),
            },
            Locale::Pt => match error {
                ApiError::InvalidCredentials => "Email ou senha inválidos.".into(),
                ApiError::DuplicateEmail => "Um utilizador com este email já existe.".into(),
                ApiError::WeakPassword => "A senha deve ter pelo menos 6 caracteres.".into(),
                ApiError::NotFound {
                    entity: Entity::User,
                } => "Utilizador não encontrado.".into(),
                ApiError::NotFound {
                    entity: Entity::Video,
                } => "Vídeo não encontrado.".into(),
                ApiError::Validation(InvalidInput::Email) => "Endereço de email inválido.".into(),
                ApiError::Validation(InvalidInput::PasswordMismatch) => {
                    "As senhas não coincidem.".into()
                }
                ApiError::Validation(InvalidInput::EmptyPrompt) => {
                    "Descreva o vídeo antes de o gerar.".into()
                }
                ApiError::Validation(InvalidInput::NoFrames) => {
                    "Adicione pelo menos uma imagem.".into()
                }
                ApiError::Validation(InvalidInput::UnavailableQuality(q)) => {
                    format!("A qualidade {q} ainda não está disponível.")
                }
                ApiError::Validation(InvalidInput::UnknownView(view)) => {
                    format!("Página desconhecida: {view}")
                }
                ApiError::Unauthorized => "Inicie sessão para continuar.".into(),
                ApiError::Forbidden => "Acesso reservado a administradores.".into(),
                ApiError::OwnAccount => {
                    "Não pode alterar o papel ou o estado da sua própria conta.".into()
                }
                ApiError::Internal(_) => "Ocorreu um erro interno.".into(),
            },
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .map(Locale::from_accept_language)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn negotiates_first_supported_language() {
        assert_eq!(Locale::from_accept_language("en-US,en;q=0.9"), Locale::En);
        assert_eq!(Locale::from_accept_language("fr-FR, pt-BR;q=0.8, en"), Locale::Pt);
        assert_eq!(Locale::from_accept_language("de, fr"), Locale::Pt);
        assert_eq!(Locale::from_accept_language(""), Locale::Pt);
    }

    #[test]
    fn status_labels() {
        assert_eq!(Locale::Pt.user_status(UserStatus::Blocked), "Bloqueado");
        assert_eq!(Locale::En.user_status(UserStatus::Active), "Active");
        assert_eq!(Locale::Pt.video_status(VideoStatus::Done), "Concluído");
    }

    #[test]
    fn dates_follow_locale() {
        let at = datetime!(2025-07-20 10:00 UTC);
        assert_eq!(Locale::Pt.date(at), "20/07/2025");
        assert_eq!(Locale::En.date(at), "07/20/2025");
    }

    #[test]
    fn portuguese_error_messages() {
        assert_eq!(
            Locale::Pt.error_message(&ApiError::InvalidCredentials),
            "Email ou senha inválidos."
        );
        assert_eq!(
            Locale::Pt.error_message(&ApiError::user_not_found()),
            "Utilizador não encontrado."
        );
        assert_eq!(
            Locale::En.error_message(&ApiError::WeakPassword),
            "The password must be at least 6 characters long."
        );
    }

    #[test]
    fn internal_details_are_not_shown() {
        let err = ApiError::Internal("argon2 exploded".into());
        assert!(!Locale::En.error_message(&err).contains("argon2"));
        assert!(!Locale::Pt.error_message(&err).contains("argon2"));
    }
}
