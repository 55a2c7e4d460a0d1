/// Current UTC date, used for attendance day boundaries
pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
