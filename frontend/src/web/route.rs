//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑，不依赖 DOM 或 web_sys。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Login,
    Dashboard,
    Courses,
    CourseDetail(String),
    Timetable,
    Profile,
    Settings,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举（忽略结尾的 '/'）
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "/login" => Self::Login,
            "" | "/dashboard" => Self::Dashboard,
            "/courses" => Self::Courses,
            "/timetable" => Self::Timetable,
            "/profile" => Self::Profile,
            "/settings" => Self::Settings,
            _ => match trimmed.strip_prefix("/courses/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::CourseDetail(id.to_string()),
                _ => Self::NotFound,
            },
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Courses => "/courses".to_string(),
            Self::CourseDetail(id) => format!("/courses/{}", id),
            Self::Timetable => "/timetable".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 除登录页和 404 外都需要认证
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 已认证用户访问登录页时离开
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 守卫：返回实际应当进入的路由
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            return Self::auth_failure_redirect();
        }
        if self.should_redirect_when_authenticated() && is_authenticated {
            return Self::auth_success_redirect();
        }
        self
    }

    /// 导航栏标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Courses => "Course Selection",
            Self::CourseDetail(_) => "Course Details",
            Self::Timetable => "Timetable",
            Self::Profile => "Profile",
            Self::Settings => "Settings",
            Self::NotFound => "Not Found",
        }
    }

    /// 导航栏高亮：详情页归属课程页
    pub fn section(&self) -> Self {
        match self {
            Self::CourseDetail(_) => Self::Courses,
            other => other.clone(),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_parse_to_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/timetable/"), AppRoute::Timetable);
        assert_eq!(
            AppRoute::from_path("/courses/CS101"),
            AppRoute::CourseDetail("CS101".into())
        );
        assert_eq!(AppRoute::from_path("/courses/a/b"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn test_to_path_round_trips_detail_route() {
        let route = AppRoute::CourseDetail("42".into());
        assert_eq!(AppRoute::from_path(&route.to_path()), route);
    }

    #[test]
    fn test_protected_routes_redirect_anonymous_users_to_login() {
        for route in [
            AppRoute::Dashboard,
            AppRoute::Courses,
            AppRoute::CourseDetail("1".into()),
            AppRoute::Timetable,
            AppRoute::Profile,
            AppRoute::Settings,
        ] {
            assert_eq!(route.guard(false), AppRoute::Login);
        }
        assert_eq!(AppRoute::NotFound.guard(false), AppRoute::NotFound);
    }

    #[test]
    fn test_authenticated_user_leaves_login() {
        assert_eq!(AppRoute::Login.guard(true), AppRoute::Dashboard);
        assert_eq!(AppRoute::Settings.guard(true), AppRoute::Settings);
    }
}
