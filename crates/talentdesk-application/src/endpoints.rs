//! Backend routes used by the stores.

pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const AUTH_ME: &str = "/api/auth/me";

pub const LEARNING_GENERATE: &str = "/api/learning/generate-path";
pub const LEARNING_MODULE_UPDATE: &str = "/api/learning/path/module";
pub const LEARNING_MODULE_COMPLETE: &str = "/api/learning/module/complete";
pub const LEARNING_TRAINING_STATUS: &str = "/api/learning/training/status";
pub const LEARNING_ROLES_GOALS: &str = "/api/learning/roles-goals";

pub fn learning_paths(employee_id: i64) -> String {
    format!("/api/learning/paths/{}", employee_id)
}

pub fn learning_progress(employee_id: i64) -> String {
    format!("/api/learning/progress/{}", employee_id)
}

pub const CHAT_SEND: &str = "/api/askhr/chat";
pub const CHAT_HISTORY: &str = "/api/chat/history";
pub const CHAT_CLEAR: &str = "/api/chat/clear";

pub const WELLNESS_RESOURCES: &str = "/api/wellness/resources";
pub const WELLNESS_EVENTS: &str = "/api/wellness/events";
pub const WELLNESS_REGISTER: &str = "/api/wellness/events/register";
pub const HR_WELLNESS_RESOURCES: &str = "/api/hr/wellness/resources";
pub const HR_WELLNESS_ALERTS: &str = "/api/hr/wellness/alerts";
pub const HR_WELLNESS_MILESTONES: &str = "/api/hr/wellness/milestones";
pub const HR_WELLNESS_AWARDS: &str = "/api/hr/wellness/awards";
pub const HR_WELLNESS_BIRTHDAYS: &str = "/api/hr/wellness/birthdays";
pub const HR_WELLNESS_SURVEYS: &str = "/api/hr/wellness/surveys";

pub const RECRUITMENT_UPLOAD: &str = "/api/recruitment/upload";
pub const RECRUITMENT_PARSE: &str = "/api/recruitment/parse";
pub const RECRUITMENT_MATCH: &str = "/api/recruitment/match";
pub const RECRUITMENT_QUESTIONS: &str = "/api/recruitment/questions";

pub const ANALYTICS_SUMMARY: &str = "/api/analytics/summary";
pub const ANALYTICS_ABSENTEEISM: &str = "/api/analytics/absenteeism-trends";
pub const ANALYTICS_RETENTION: &str = "/api/analytics/retention-risk";
pub const ANALYTICS_TRAINING_COMPLETION: &str = "/api/analytics/training-completion";
pub const ANALYTICS_DEPARTMENTS: &str = "/api/analytics/departments";
pub const ANALYTICS_OVERVIEW: &str = "/api/analytics/overview";
pub const ANALYTICS_RECRUITMENT: &str = "/api/analytics/recruitment";
pub const ANALYTICS_TRAINING: &str = "/api/analytics/training";

pub const POLICY_GENERATE_JOB: &str = "/api/policy/generate/job";
pub const POLICY_GENERATE_DOCUMENT: &str = "/api/policy/generate/document";
pub const POLICY_LOCATIONS: &str = "/api/policy/locations";
pub const POLICY_TONES: &str = "/api/policy/tones";

pub const SENTIMENT_ANALYZE: &str = "/api/sentiment/analyze";
pub const SENTIMENT_TREND: &str = "/api/sentiment/trend";
pub const SENTIMENT_THEMES: &str = "/api/sentiment/themes";

pub const EMPLOYEE_SKILLS: &str = "/api/employee/ai_skill_recommendations";
pub const EMPLOYEE_REFERENCE: &str = "/api/employee/document_request/reference";
pub const EMPLOYEE_EMPLOYMENT_PROOF: &str = "/api/employee/document_request/employment_proof";

pub fn employee_dashboard(employee_id: i64) -> String {
    format!("/api/employee/dashboard/summary/{}", employee_id)
}
