use crate::models::domain::{Chat, QuizQuestion};
