//! Time-of-day greeting shown at the top of the report

/// Greeting for an hour of the day (0-23)
pub fn greeting(hour: u32) -> &'static str {
    tracing::debug!(hour, "choosing greeting");
    match hour {
        6..=11 => "Доброе утро",
        12..=17 => "Добрый день",
        18..=22 => "Добрый вечер",
        _ => "Доброй ночи",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting(7), "Доброе утро");
        assert_eq!(greeting(13), "Добрый день");
        assert_eq!(greeting(19), "Добрый вечер");
        assert_eq!(greeting(23), "Доброй ночи");
        assert_eq!(greeting(4), "Доброй ночи");
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(5), "Доброй ночи");
        assert_eq!(greeting(6), "Доброе утро");
        assert_eq!(greeting(11), "Доброе утро");
        assert_eq!(greeting(12), "Добрый день");
        assert_eq!(greeting(18), "Добрый вечер");
        assert_eq!(greeting(22), "Добрый вечер");
        assert_eq!(greeting(0), "Доброй ночи");
    }
}
