//! 会话操作失败时展示给用户的法语提示

use crate::errors::CampusError;
use crate::identity::ProviderKind;

pub const MSG_INVALID_CREDENTIALS: &str = "Email ou mot de passe incorrect";
pub const MSG_RATE_LIMITED: &str = "Trop de tentatives. Veuillez réessayer plus tard";
pub const MSG_EMAIL_IN_USE: &str =
    "Cet email est déjà utilisé. Veuillez vous connecter ou utiliser une autre adresse.";
pub const MSG_WEAK_PASSWORD: &str = "Le mot de passe doit contenir au moins 6 caractères.";
pub const MSG_INVALID_EMAIL: &str = "Format d'email invalide.";
pub const MSG_ACCOUNT_NOT_FOUND: &str = "Aucun compte associé à cette adresse email";
pub const MSG_NOT_SIGNED_IN: &str = "Vous devez être connecté pour effectuer cette opération.";
pub const MSG_RESET_CODE_INVALID: &str = "Le code de réinitialisation est invalide ou a expiré.";

pub const MSG_PROFILE_UPDATED: &str = "Votre profil a été mis à jour avec succès.";
pub const MSG_PASSWORD_UPDATED: &str = "Votre mot de passe a été mis à jour.";

/// 会话门面的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOp {
    Register,
    Login,
    LoginWithProvider(ProviderKind),
    ResetPassword,
    ConfirmPasswordReset,
    UpdateProfile,
    UpdateEmail,
    UpdatePassword,
    Logout,
}

impl SessionOp {
    /// 没有更具体的提示时使用
    pub fn fallback_message(self) -> &'static str {
        match self {
            SessionOp::Register => {
                "L'inscription a échoué. Veuillez vérifier vos informations et réessayer."
            }
            SessionOp::Login => {
                "La connexion a échoué. Veuillez vérifier votre email et mot de passe."
            }
            SessionOp::LoginWithProvider(ProviderKind::Google) => {
                "La connexion avec Google a échoué. Veuillez réessayer ultérieurement."
            }
            SessionOp::LoginWithProvider(ProviderKind::Github) => {
                "La connexion avec Github a échoué. Veuillez réessayer ultérieurement."
            }
            SessionOp::ResetPassword | SessionOp::ConfirmPasswordReset => {
                "Le mot de passe n'a pas pu être réinitialisé. Veuillez réessayer ultérieurement."
            }
            SessionOp::UpdateProfile => "La mise à jour du profil a échoué.",
            SessionOp::UpdateEmail => "La mise à jour de l'email a échoué.",
            SessionOp::UpdatePassword => "La mise à jour du mot de passe a échoué.",
            SessionOp::Logout => "La déconnexion a échoué. Veuillez réessayer ultérieurement.",
        }
    }
}

pub fn user_message(op: SessionOp, err: &CampusError) -> &'static str {
    match (err, op) {
        (CampusError::InvalidCredentials(_), SessionOp::Login) => MSG_INVALID_CREDENTIALS,
        (CampusError::RateLimited(_), _) => MSG_RATE_LIMITED,
        (CampusError::EmailAlreadyInUse(_), _) => MSG_EMAIL_IN_USE,
        (CampusError::WeakPassword(_), _) => MSG_WEAK_PASSWORD,
        (CampusError::InvalidEmail(_), _) => MSG_INVALID_EMAIL,
        (CampusError::AccountNotFound(_), SessionOp::ResetPassword) => MSG_ACCOUNT_NOT_FOUND,
        (CampusError::Authentication(_), SessionOp::ConfirmPasswordReset) => {
            MSG_RESET_CODE_INVALID
        }
        (CampusError::Authentication(_), _) => MSG_NOT_SIGNED_IN,
        _ => op.fallback_message(),
    }
}
