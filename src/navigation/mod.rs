//! 导航外壳
//!
//! 根据会话状态在未登录流程与登录后的标签页流程之间切换。

use serde::Serialize;
use ts_rs::TS;

use crate::session::SessionState;

/// 未登录流程中的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../mobile/src/types/generated/navigation.ts")]
pub enum AuthScreen {
    Welcome,
    Login,
    Register,
    ForgotPassword,
}

/// 登录后的标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../mobile/src/types/generated/navigation.ts")]
pub enum MainTab {
    Dashboard,
    Courses,
    Students,
    Teachers,
    Resources,
    Events,
    Projects,
    Profile,
}

impl MainTab {
    pub const ALL: [MainTab; 8] = [
        MainTab::Dashboard,
        MainTab::Courses,
        MainTab::Students,
        MainTab::Teachers,
        MainTab::Resources,
        MainTab::Events,
        MainTab::Projects,
        MainTab::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MainTab::Dashboard => "Accueil",
            MainTab::Courses => "Cours",
            MainTab::Students => "Étudiants",
            MainTab::Teachers => "Enseignants",
            MainTab::Resources => "Ressources",
            MainTab::Events => "Événements",
            MainTab::Projects => "Projets",
            MainTab::Profile => "Profil",
        }
    }

    /// 对应的实体集合，仪表盘与个人资料没有
    pub fn collection(self) -> Option<&'static str> {
        match self {
            MainTab::Courses => Some("courses"),
            MainTab::Students => Some("students"),
            MainTab::Teachers => Some("teachers"),
            MainTab::Resources => Some("resources"),
            MainTab::Events => Some("events"),
            MainTab::Projects => Some("projects"),
            MainTab::Dashboard | MainTab::Profile => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/navigation.ts")]
pub struct TabEntry {
    pub tab: MainTab,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "flow", rename_all = "snake_case")]
#[ts(export, export_to = "../mobile/src/types/generated/navigation.ts")]
pub enum Flow {
    Auth {
        screens: Vec<AuthScreen>,
        initial: AuthScreen,
    },
    Main {
        tabs: Vec<TabEntry>,
        initial: MainTab,
    },
}

pub struct NavigationShell;

impl NavigationShell {
    pub fn resolve(state: &SessionState) -> Flow {
        match state {
            SessionState::Unauthenticated => Flow::Auth {
                screens: vec![
                    AuthScreen::Welcome,
                    AuthScreen::Login,
                    AuthScreen::Register,
                    AuthScreen::ForgotPassword,
                ],
                initial: AuthScreen::Welcome,
            },
            SessionState::Authenticated(_) => Flow::Main {
                tabs: MainTab::ALL
                    .iter()
                    .map(|&tab| TabEntry {
                        tab,
                        label: tab.label().to_string(),
                    })
                    .collect(),
                initial: MainTab::Dashboard,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{SignInProvider, User, UserRole};

    #[test]
    fn test_unauthenticated_gets_auth_flow() {
        let flow = NavigationShell::resolve(&SessionState::Unauthenticated);
        let Flow::Auth { screens, initial } = flow else {
            panic!("expected auth flow");
        };
        assert_eq!(initial, AuthScreen::Welcome);
        assert_eq!(screens.len(), 4);
        assert!(screens.contains(&AuthScreen::ForgotPassword));
    }

    #[test]
    fn test_authenticated_gets_tabs_in_order() {
        let now = chrono::Utc::now();
        let state = SessionState::Authenticated(User {
            id: "u-1".into(),
            email: "awa@univ.fr".into(),
            password_hash: String::new(),
            display_name: None,
            photo_url: None,
            role: UserRole::Student,
            provider: SignInProvider::Password,
            created_at: now,
            updated_at: now,
        });

        let Flow::Main { tabs, initial } = NavigationShell::resolve(&state) else {
            panic!("expected main flow");
        };
        assert_eq!(initial, MainTab::Dashboard);
        let labels: Vec<&str> = tabs.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Accueil",
                "Cours",
                "Étudiants",
                "Enseignants",
                "Ressources",
                "Événements",
                "Projets",
                "Profil"
            ]
        );
    }

    #[test]
    fn test_flow_serializes_with_tag() {
        let json = serde_json::to_value(NavigationShell::resolve(&SessionState::Unauthenticated))
            .unwrap();
        assert_eq!(json["flow"], "auth");
        assert_eq!(json["initial"], "welcome");
    }

    #[test]
    fn test_tabs_map_to_collections() {
        assert_eq!(MainTab::Students.collection(), Some("students"));
        assert_eq!(MainTab::Profile.collection(), None);
    }
}
