use std::str::FromStr;

/// Distance from the top of the viewport at which a section counts as the
/// one being read.
pub const ACTIVE_LINE: f64 = 100.0;

/// Scroll offset after which the navigation bar switches to its compact look.
pub const SCROLLED_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    About,
    Skills,
    Projects,
    Education,
    Contact,
}

impl Section {
    /// All sections in page order.
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::About,
        Self::Skills,
        Self::Projects,
        Self::Education,
        Self::Contact,
    ];

    /// Element id of the section on the page.
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Education => "education",
            Self::Contact => "contact",
        }
    }
}

impl FromStr for Section {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or(())
    }
}

/// Bounding box of a section relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    fn contains_active_line(self) -> bool {
        self.top <= ACTIVE_LINE && self.bottom >= ACTIVE_LINE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTracker {
    active: Section,
    scrolled: bool,
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self {
            active: Section::Home,
            scrolled: false,
        }
    }
}

impl SectionTracker {
    pub fn active(&self) -> Section {
        self.active
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Update the state after the page was scrolled to `scroll_y`.
    ///
    /// `bounds` returns the current bounding box of a section, or `None` if
    /// it is not rendered. The first section in page order that crosses
    /// [`ACTIVE_LINE`] becomes active. If none does, the previous one stays.
    pub fn on_scroll(
        &mut self,
        scroll_y: f64,
        bounds: impl Fn(Section) -> Option<Bounds>,
    ) -> Section {
        self.scrolled = scroll_y > SCROLLED_THRESHOLD;

        if let Some(section) = Section::ALL
            .into_iter()
            .find(|&section| bounds(section).is_some_and(Bounds::contains_active_line))
        {
            self.active = section;
        }

        self.active
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Sections stacked 800px high, starting at the top of the document.
    fn layout(scroll_y: f64) -> impl Fn(Section) -> Option<Bounds> {
        move |section| {
            let index = Section::ALL.iter().position(|&s| s == section)? as f64;
            let top = index * 800.0 - scroll_y;
            Some(Bounds {
                top,
                bottom: top + 800.0,
            })
        }
    }

    #[test]
    fn initial_state() {
        let tracker = SectionTracker::default();

        assert_eq!(tracker.active(), Section::Home);
        assert!(!tracker.is_scrolled());
    }

    #[test]
    fn follows_scroll_position() {
        let mut tracker = SectionTracker::default();

        for (scroll_y, expected, scrolled) in [
            (0.0, Section::Home, false),
            (50.0, Section::Home, false),
            (51.0, Section::Home, true),
            (650.0, Section::Home, true),
            (800.0, Section::About, true),
            (2500.0, Section::Projects, true),
            (4100.0, Section::Contact, true),
        ] {
            assert_eq!(tracker.on_scroll(scroll_y, layout(scroll_y)), expected);
            assert_eq!(tracker.is_scrolled(), scrolled, "{scroll_y}");
        }
    }

    #[test]
    fn first_matching_section_wins() {
        let mut tracker = SectionTracker::default();

        // the line at 100px touches the bottom of home and the top of about
        let active = tracker.on_scroll(700.0, |section| match section {
            Section::Home => Some(Bounds {
                top: -700.0,
                bottom: 100.0,
            }),
            Section::About => Some(Bounds {
                top: 100.0,
                bottom: 900.0,
            }),
            _ => None,
        });

        assert_eq!(active, Section::Home);
    }

    #[test]
    fn keeps_previous_section_without_match() {
        let mut tracker = SectionTracker::default();
        tracker.on_scroll(2500.0, layout(2500.0));

        let active = tracker.on_scroll(3000.0, |_| None);

        assert_eq!(active, Section::Projects);
    }

    #[test]
    fn section_ids() {
        let ids = Section::ALL.map(Section::id);

        assert_eq!(
            ids,
            ["home", "about", "skills", "projects", "education", "contact"]
        );
        for section in Section::ALL {
            assert_eq!(section.id().parse(), Ok(section));
        }
        assert_eq!("footer".parse::<Section>(), Err(()));
    }
}
