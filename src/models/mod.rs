pub mod diary;
pub mod weather;
