/// Builds the backend's filter expression: `field ~ '*text*'` for contains,
/// `field : 'VALUE'` for equality, clauses joined with ` and `.
///
/// Blank values are skipped, and so is the `all` sentinel used by level and
/// status pickers.
#[derive(Debug, Default, Clone)]
pub struct FilterBuilder {
    clauses: Vec<String>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = usable(value) {
            self.clauses.push(format!("{field} ~ '*{value}*'"));
        }
        self
    }

    pub fn equals(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = usable(value) {
            if !value.eq_ignore_ascii_case("all") {
                self.clauses.push(format!("{field} : '{value}'"));
            }
        }
        self
    }

    pub fn build(self) -> Option<String> {
        (!self.clauses.is_empty()).then(|| self.clauses.join(" and "))
    }
}

fn usable(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().replace('\'', ""))
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_yields_none() {
        assert_eq!(FilterBuilder::new().build(), None);
        let filter = FilterBuilder::new()
            .contains("name", Some("   "))
            .equals("level", Some("all"))
            .contains("location", None)
            .build();
        assert_eq!(filter, None);
    }

    #[test]
    fn test_clauses_are_joined_in_order() {
        let filter = FilterBuilder::new()
            .contains("name", Some("rust"))
            .contains("company.name", Some("ACME"))
            .equals("level", Some("SENIOR"))
            .contains("location", Some("Hà Nội"))
            .build();
        assert_eq!(
            filter.as_deref(),
            Some("name ~ '*rust*' and company.name ~ '*ACME*' and level : 'SENIOR' and location ~ '*Hà Nội*'")
        );
    }

    #[test]
    fn test_quotes_are_stripped() {
        let filter = FilterBuilder::new().contains("job.name", Some("O'Brien")).build();
        assert_eq!(filter.as_deref(), Some("job.name ~ '*OBrien*'"));
    }
}
