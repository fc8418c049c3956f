/// Compute the effective row limit: `--limit` wins over the configured
/// default. Zero means no limit.
#[must_use]
pub fn effective_limit(flag: Option<u32>, configured: u32) -> Option<usize> {
    let limit = flag.unwrap_or(configured);
    if limit == 0 {
        None
    } else {
        usize::try_from(limit).ok()
    }
}

/// Truncate `items` to the effective limit.
pub fn apply_limit<T>(items: &mut Vec<T>, flag: Option<u32>, configured: u32) {
    if let Some(limit) = effective_limit(flag, configured) {
        items.truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_limit, effective_limit};

    #[test]
    fn flag_takes_precedence() {
        assert_eq!(effective_limit(Some(5), 50), Some(5));
    }

    #[test]
    fn configured_default_used_when_flag_missing() {
        assert_eq!(effective_limit(None, 50), Some(50));
    }

    #[test]
    fn zero_disables_the_limit() {
        assert_eq!(effective_limit(Some(0), 50), None);
        assert_eq!(effective_limit(None, 0), None);
    }

    #[test]
    fn apply_limit_truncates() {
        let mut items = vec![1, 2, 3, 4];
        apply_limit(&mut items, Some(2), 50);
        assert_eq!(items, vec![1, 2]);

        let mut items = vec![1, 2, 3];
        apply_limit(&mut items, Some(0), 1);
        assert_eq!(items.len(), 3);
    }
}
