//! Vacancy search APIs.

pub mod headhunter;
pub mod superjob;

pub use headhunter::{HeadHunter, HhSalary, HhVacancy};
pub use superjob::{SjVacancy, SuperJob};
