//! 发信通道
//!
//! 身份服务只需要投递密码重置码，生产环境可替换为真实的 SMTP 实现。

use async_trait::async_trait;
use tracing::info;

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    /// 密码重置邮件
    pub fn password_reset(to: &str, code: &str, valid_minutes: u64) -> Self {
        Self {
            to: to.to_string(),
            subject: "Réinitialisation de votre mot de passe".to_string(),
            body: format!(
                "Votre code de réinitialisation est : {code}\n\
                 Ce code est valable {valid_minutes} minutes. \
                 Si vous n'êtes pas à l'origine de cette demande, ignorez ce message."
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<()>;
}

/// 把邮件写入日志，开发环境使用
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Outgoing mail:\n{}",
            message.body
        );
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// 记录已发送邮件，供测试断言
    #[derive(Default)]
    pub struct RecordingMailer {
        sent: Mutex<Vec<MailMessage>>,
    }

    impl RecordingMailer {
        pub fn sent(&self) -> Vec<MailMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: MailMessage) -> Result<()> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_reset_message_carries_code() {
        let message = MailMessage::password_reset("awa@univ.fr", "K7PX2QMA", 15);
        assert_eq!(message.to, "awa@univ.fr");
        assert!(message.body.contains("K7PX2QMA"));
        assert!(message.body.contains("15 minutes"));
    }

    #[tokio::test]
    async fn test_log_mailer_accepts_message() {
        let result = LogMailer
            .send(MailMessage::password_reset("awa@univ.fr", "ABCD2345", 15))
            .await;
        assert!(result.is_ok());
    }
}
