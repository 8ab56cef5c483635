// Questionnaire core: answer store, step controller and the session tying them together.

pub mod answer_store;
pub mod catalog;
pub mod question;
pub mod session;
pub mod step_controller;
