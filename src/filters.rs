use crate::cli::FilterArgs;
use anyhow::{bail, Result};
use configuration::DefaultFilters;
use core_types::{Dataset, FilterSelection};

/// A selection built from CLI flags and configured defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFilters {
    pub selection: FilterSelection,
    /// End of the effective year range, used as the "current" year by the
    /// single-year views.
    pub year_to: Option<i32>,
}

/// Combines CLI flags with configured defaults, the way the dashboard
/// sidebar does: the year range is bounded by the years present in the data.
pub fn resolve(args: &FilterArgs, defaults: &DefaultFilters, dataset: &Dataset) -> Result<ResolvedFilters> {
    let from = args.from.or(defaults.year_from);
    let to = args.to.or(defaults.year_to);
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            bail!("Year range is inverted: {from} is after {to}");
        }
    }

    let mut selection = FilterSelection::new();
    let mut year_to = dataset.latest_year();

    let years = dataset.years();
    if let (Some(&min), Some(&max)) = (years.first(), years.last()) {
        if from.is_some() || to.is_some() {
            let lo = from.unwrap_or(min).max(min);
            let hi = to.unwrap_or(max).min(max);
            selection = if lo <= hi {
                year_to = Some(hi);
                selection.with_year_range(lo, hi)?
            } else {
                // The range lies entirely outside the data, so every given
                // endpoint is a year the dataset lacks. Selecting only those
                // years matches nothing.
                year_to = to.or(from);
                selection.with_years(from.into_iter().chain(to))
            };
        }
    }

    let countries: Vec<String> = if args.all_countries {
        Vec::new()
    } else if !args.countries.is_empty() {
        args.countries.clone()
    } else {
        defaults.countries.clone()
    };
    for country in &countries {
        if !dataset.contains_country(country) {
            tracing::warn!(country = %country, "Selected country is not in the dataset.");
        }
    }
    selection = selection.with_countries(countries);

    tracing::debug!(?selection, ?year_to, "Filters resolved.");
    Ok(ResolvedFilters { selection, year_to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::GdpRecord;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            GdpRecord::new("India", None, 1998, 1.0).unwrap(),
            GdpRecord::new("India", None, 2001, 2.0).unwrap(),
            GdpRecord::new("China", None, 2003, 3.0).unwrap(),
        ])
        .unwrap()
    }

    fn no_defaults() -> DefaultFilters {
        DefaultFilters {
            year_from: None,
            year_to: None,
            countries: Vec::new(),
        }
    }

    #[test]
    fn no_flags_and_no_defaults_selects_everything() {
        let resolved = resolve(&FilterArgs::default(), &no_defaults(), &dataset()).unwrap();
        assert!(resolved.selection.is_unrestricted());
        assert_eq!(resolved.year_to, Some(2003));
    }

    #[test]
    fn configured_defaults_apply_and_clamp_to_data() {
        let resolved = resolve(&FilterArgs::default(), &DefaultFilters::default(), &dataset()).unwrap();
        assert_eq!(
            resolved.selection.years.iter().copied().collect::<Vec<_>>(),
            vec![2000, 2001, 2002, 2003]
        );
        assert!(resolved.selection.countries.contains("India"));
        assert_eq!(resolved.year_to, Some(2003));
    }

    #[test]
    fn flags_override_defaults() {
        let args = FilterArgs {
            from: Some(1990),
            to: Some(1999),
            countries: vec!["China".to_string()],
            all_countries: false,
        };
        let resolved = resolve(&args, &DefaultFilters::default(), &dataset()).unwrap();
        assert_eq!(
            resolved.selection.years.iter().copied().collect::<Vec<_>>(),
            vec![1998, 1999]
        );
        assert_eq!(resolved.selection.countries.len(), 1);
        assert_eq!(resolved.year_to, Some(1999));
    }

    #[test]
    fn all_countries_drops_default_list() {
        let args = FilterArgs {
            all_countries: true,
            ..FilterArgs::default()
        };
        let resolved = resolve(&args, &DefaultFilters::default(), &dataset()).unwrap();
        assert!(resolved.selection.countries.is_empty());
    }

    #[test]
    fn range_outside_data_matches_nothing() {
        let args = FilterArgs {
            from: Some(2050),
            to: Some(2060),
            ..FilterArgs::default()
        };
        let dataset = dataset();
        let resolved = resolve(&args, &no_defaults(), &dataset).unwrap();
        assert!(!resolved.selection.years.is_empty());
        assert!(dataset.records().iter().all(|r| !resolved.selection.matches(r)));
    }

    #[test]
    fn open_ended_range_after_data_matches_nothing() {
        let args = FilterArgs {
            from: Some(2050),
            ..FilterArgs::default()
        };
        let dataset = dataset();
        let resolved = resolve(&args, &no_defaults(), &dataset).unwrap();
        assert!(dataset.records().iter().all(|r| !resolved.selection.matches(r)));
        assert_eq!(resolved.year_to, Some(2050));
    }

    #[test]
    fn open_ended_range_before_data_matches_nothing() {
        let args = FilterArgs {
            to: Some(1950),
            ..FilterArgs::default()
        };
        let dataset = dataset();
        let resolved = resolve(&args, &no_defaults(), &dataset).unwrap();
        assert!(dataset.records().iter().all(|r| !resolved.selection.matches(r)));
        assert_eq!(resolved.year_to, Some(1950));
    }

    #[test]
    fn default_start_after_data_matches_nothing() {
        let dataset = Dataset::new(vec![
            GdpRecord::new("India", None, 1995, 1.0).unwrap(),
            GdpRecord::new("India", None, 1996, 2.0).unwrap(),
        ])
        .unwrap();
        let defaults = DefaultFilters {
            countries: Vec::new(),
            ..DefaultFilters::default()
        };
        let resolved = resolve(&FilterArgs::default(), &defaults, &dataset).unwrap();
        assert!(dataset.records().iter().all(|r| !resolved.selection.matches(r)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let args = FilterArgs {
            from: Some(2005),
            to: Some(2001),
            ..FilterArgs::default()
        };
        assert!(resolve(&args, &no_defaults(), &dataset()).is_err());
    }
}
