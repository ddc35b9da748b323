//! Service status parsing for `sc query` output.

/// Pulls the numeric state code out of an `sc query <name>` dump.
///
/// The relevant line looks like `STATE : 4  RUNNING`; only the
/// code is used, the trailing label is the service manager's own rendering.
pub fn parse_service_state(lines: &[String]) -> Option<u32> {
    lines.iter().find_map(|line| {
        let trimmed = line.trim();
        if !trimmed.starts_with("STATE") {
            return None;
        }
        let (_, rest) = trimmed.split_once(':')?;
        rest.split_whitespace().next()?.parse().ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn running_state_code_is_extracted() {
        let input = lines(&[
            "SERVICE_NAME: DNS",
            "        TYPE               : 10  WIN32_OWN_PROCESS",
            "        STATE              : 4  RUNNING",
            "                                (STOPPABLE, PAUSABLE, ACCEPTS_SHUTDOWN)",
        ]);
        assert_eq!(parse_service_state(&input), Some(4));
    }

    #[test]
    fn stopped_state_code_is_extracted() {
        let input = lines(&[
            "SERVICE_NAME: DHCPServer",
            "        STATE              : 1  STOPPED",
        ]);
        assert_eq!(parse_service_state(&input), Some(1));
    }

    #[test]
    fn missing_state_line_yields_none() {
        let input = lines(&["[SC] EnumQueryServicesStatus:OpenService FAILED 1060"]);
        assert_eq!(parse_service_state(&input), None);
    }
}
