pub mod daily_weather;
pub mod diary;
pub mod weather;
