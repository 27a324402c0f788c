use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Descreve um TTL em português, na maior unidade que o divide exatamente.
///
/// Dias só são usados acima de 24 horas, para que o padrão leia "24 horas".
pub fn describe_ttl(ttl: Duration) -> String {
    let secs = ttl.as_secs();
    let (n, singular, plural) = if secs > DAY && secs % DAY == 0 {
        (secs / DAY, "dia", "dias")
    } else if secs >= HOUR && secs % HOUR == 0 {
        (secs / HOUR, "hora", "horas")
    } else if secs >= MINUTE && secs % MINUTE == 0 {
        (secs / MINUTE, "minuto", "minutos")
    } else {
        (secs, "segundo", "segundos")
    };

    if n == 1 {
        format!("1 {singular}")
    } else {
        format!("{n} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttl_reads_in_hours() {
        assert_eq!(describe_ttl(Duration::from_secs(86_400)), "24 horas");
    }

    #[test]
    fn singular_units() {
        assert_eq!(describe_ttl(Duration::from_secs(3_600)), "1 hora");
        assert_eq!(describe_ttl(Duration::from_secs(60)), "1 minuto");
        assert_eq!(describe_ttl(Duration::from_secs(1)), "1 segundo");
    }

    #[test]
    fn falls_back_to_smaller_unit() {
        assert_eq!(describe_ttl(Duration::from_secs(90 * 60)), "90 minutos");
        assert_eq!(describe_ttl(Duration::from_secs(45)), "45 segundos");
        assert_eq!(describe_ttl(Duration::from_secs(3_601)), "3601 segundos");
    }

    #[test]
    fn multiple_days() {
        assert_eq!(describe_ttl(Duration::from_secs(7 * 86_400)), "7 dias");
    }

    #[test]
    fn sub_second_rounds_down() {
        assert_eq!(describe_ttl(Duration::from_millis(500)), "0 segundos");
    }
}
