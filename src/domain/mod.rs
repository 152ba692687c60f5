pub mod advice;
pub mod models;
pub mod mood;
pub mod questionnaire;
