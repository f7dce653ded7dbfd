//! Plain-text rendering of the page.

use std::fmt;

use super::{DoctorCard, FilterOption, PageView, LOADING_TEXT, LOAD_FAILED_TEXT};

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageView::Loading => writeln!(f, "{}", LOADING_TEXT),
            PageView::Failed => writeln!(f, "{}", LOAD_FAILED_TEXT),
            PageView::Ready {
                search,
                filters,
                cards,
                empty_message,
            } => {
                if search.draft.is_empty() {
                    writeln!(f, "Search: ({})", search.placeholder)?;
                } else {
                    writeln!(f, "Search: {}", search.draft)?;
                }
                for (i, suggestion) in search.suggestions.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, suggestion)?;
                }

                writeln!(f)?;
                writeln!(f, "Sort By")?;
                write_options(f, &filters.sort, "( )", "(*)")?;
                writeln!(f, "Mode of Consultation")?;
                write_options(f, &filters.consultation, "( )", "(*)")?;
                writeln!(f, "Specialities")?;
                write_options(f, &filters.specialties, "[ ]", "[x]")?;

                writeln!(f)?;
                if let Some(message) = empty_message {
                    return writeln!(f, "{}", message);
                }
                for card in cards {
                    write_card(f, card)?;
                }
                Ok(())
            }
        }
    }
}

fn write_options(
    f: &mut fmt::Formatter<'_>,
    options: &[FilterOption],
    off: &str,
    on: &str,
) -> fmt::Result {
    for option in options {
        let mark = if option.checked { on } else { off };
        writeln!(f, "  {} {}", mark, option.label)?;
    }
    Ok(())
}

fn write_card(f: &mut fmt::Formatter<'_>, card: &DoctorCard) -> fmt::Result {
    writeln!(f, "{}", card.name)?;
    writeln!(f, "  {}", card.specialties)?;
    writeln!(f, "  {}  |  {}", card.experience, card.fee)?;
    writeln!(f, "  Available for: {}", card.consultation_modes)?;
    writeln!(f)
}
