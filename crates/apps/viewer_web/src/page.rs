//! Non-visual state for the rest of the portfolio page.

use content::{Achievement, AchievementFilter};
use serde::Serialize;
use thiserror::Error;

/// Reading progress bar along the top of the page.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct ScrollProgress {
    pub percent: f64,
    pub visible: bool,
}

impl ScrollProgress {
    const VISIBLE_ABOVE_PERCENT: f64 = 5.0;

    pub fn from_scroll(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Self {
        let scrollable = scroll_height - viewport_height;
        let percent = if scrollable > 0.0 && scroll_y.is_finite() {
            (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            percent,
            visible: percent > Self::VISIBLE_ABOVE_PERCENT,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub scrolled: bool,
    pub theme: Theme,
    pub mobile_menu_open: bool,
}

impl NavState {
    const SCROLLED_AFTER_PX: f64 = 50.0;

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scrolled = scroll_y > Self::SCROLLED_AFTER_PX;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.theme
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    /// Choosing a section always closes the mobile menu.
    pub fn section_chosen(&mut self) {
        self.mobile_menu_open = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,
    #[error("email address {0:?} is not valid")]
    InvalidEmail(String),
    #[error("message is required")]
    EmptyMessage,
    #[error("a message is already being sent")]
    Busy,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(ContactField::Name),
            "email" => Some(ContactField::Email),
            "message" => Some(ContactField::Message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

/// Contact form with a locally simulated submission.
///
/// Submission completes after [`ContactForm::SEND_DELAY_S`] of frame time;
/// no network request is made.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Seconds left on an in-flight submission.
    #[serde(skip)]
    sending_for_s: Option<f64>,
}

impl ContactForm {
    pub const SEND_DELAY_S: f64 = 2.0;

    pub fn set_field(&mut self, field: ContactField, value: &str) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value.to_owned();
    }

    pub fn is_submitting(&self) -> bool {
        self.sending_for_s.is_some()
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingName);
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail(self.email.clone()));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::EmptyMessage);
        }
        Ok(())
    }

    pub fn submit(&mut self) -> Result<(), ContactError> {
        if self.is_submitting() {
            return Err(ContactError::Busy);
        }
        self.validate()?;
        tracing::info!("contact form submitted");
        self.sending_for_s = Some(Self::SEND_DELAY_S);
        Ok(())
    }

    /// Advances the simulated submission. Returns the success notice on the
    /// frame the submission completes; the fields are cleared at that point.
    pub fn advance(&mut self, dt_s: f64) -> Option<Notice> {
        let left = self.sending_for_s? - dt_s.max(0.0);
        if left > 0.0 {
            self.sending_for_s = Some(left);
            return None;
        }
        *self = Self::default();
        Some(Notice {
            title: "Message sent successfully!".to_owned(),
            description: "Thank you for reaching out. I'll get back to you soon.".to_owned(),
        })
    }
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
        && !s.chars().any(char::is_whitespace)
}

/// Achievements grid: active category filter plus an optional details view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AchievementsView {
    filter: AchievementFilter,
    /// Index into the full achievement list.
    details: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementsSnapshot<'a> {
    pub filter: &'static str,
    pub visible: Vec<&'a Achievement>,
    pub details: Option<&'a Achievement>,
}

impl AchievementsView {
    pub fn filter(&self) -> AchievementFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: AchievementFilter) {
        self.filter = filter;
    }

    /// Opens details for the `position`-th achievement currently visible.
    pub fn open_details(&mut self, all: &[Achievement], position: usize) -> bool {
        let index = all
            .iter()
            .enumerate()
            .filter(|(_, a)| self.filter.matches(a))
            .nth(position)
            .map(|(i, _)| i);
        self.details = index;
        index.is_some()
    }

    pub fn close_details(&mut self) {
        self.details = None;
    }

    pub fn snapshot<'a>(&self, all: &'a [Achievement]) -> AchievementsSnapshot<'a> {
        AchievementsSnapshot {
            filter: self.filter.label(),
            visible: self.filter.apply(all),
            details: self.details.and_then(|i| all.get(i)),
        }
    }
}

/// All page-level state next to the globe.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub scroll: ScrollProgress,
    pub nav: NavState,
    pub contact: ContactForm,
    pub achievements: AchievementsView,
}

#[cfg(test)]
mod tests {
    use super::{
        AchievementsView, ContactError, ContactField, ContactForm, NavState, ScrollProgress, Theme,
    };
    use content::{AchievementFilter, Category, Content};

    #[test]
    fn scroll_progress_clamps_and_shows_after_five_percent() {
        let p = ScrollProgress::from_scroll(0.0, 3000.0, 1000.0);
        assert_eq!(p.percent, 0.0);
        assert!(!p.visible);

        let p = ScrollProgress::from_scroll(200.0, 3000.0, 1000.0);
        assert_eq!(p.percent, 10.0);
        assert!(p.visible);

        assert_eq!(ScrollProgress::from_scroll(5000.0, 3000.0, 1000.0).percent, 100.0);
        assert_eq!(ScrollProgress::from_scroll(-20.0, 3000.0, 1000.0).percent, 0.0);
        assert_eq!(ScrollProgress::from_scroll(10.0, 800.0, 1000.0).percent, 0.0);
    }

    #[test]
    fn nav_tracks_scroll_theme_and_menu() {
        let mut nav = NavState::default();
        nav.on_scroll(50.0);
        assert!(!nav.scrolled);
        nav.on_scroll(51.0);
        assert!(nav.scrolled);

        assert_eq!(nav.toggle_theme(), Theme::Dark);
        assert_eq!(nav.toggle_theme(), Theme::Light);

        nav.toggle_mobile_menu();
        assert!(nav.mobile_menu_open);
        nav.section_chosen();
        assert!(!nav.mobile_menu_open);
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.set_field(ContactField::Name, "Ada");
        form.set_field(ContactField::Email, "ada@example.com");
        form.set_field(ContactField::Message, "Hello!");
        form
    }

    #[test]
    fn contact_validation_errors_are_values() {
        let mut form = ContactForm::default();
        assert_eq!(form.submit(), Err(ContactError::MissingName));
        form.set_field(ContactField::Name, "Ada");
        form.set_field(ContactField::Email, "ada.example.com");
        assert!(matches!(form.submit(), Err(ContactError::InvalidEmail(_))));
        form.set_field(ContactField::Email, "ada@example.com");
        assert_eq!(form.submit(), Err(ContactError::EmptyMessage));
        assert!(!form.is_submitting());
    }

    #[test]
    fn submission_completes_after_two_seconds_and_resets() {
        let mut form = filled();
        form.submit().unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.submit(), Err(ContactError::Busy));

        let mut notice = None;
        let mut elapsed = 0.0;
        while notice.is_none() {
            notice = form.advance(0.1);
            elapsed += 0.1;
            assert!(elapsed < 3.0);
        }
        assert!(elapsed >= 1.9);
        assert_eq!(notice.unwrap().title, "Message sent successfully!");
        assert_eq!(form, ContactForm::default());
        assert_eq!(form.advance(0.1), None);
    }

    #[test]
    fn achievements_filter_and_details() {
        let content = Content::builtin().unwrap();
        let all = &content.achievements;
        let mut view = AchievementsView::default();
        assert_eq!(view.snapshot(all).visible.len(), all.len());

        view.set_filter(AchievementFilter::Only(Category::Research));
        let snap = view.snapshot(all);
        assert_eq!(snap.filter, "Research");
        assert!(snap.visible.iter().all(|a| a.category == Category::Research));

        assert!(view.open_details(all, 0));
        assert_eq!(view.snapshot(all).details.map(|a| a.category), Some(Category::Research));
        assert!(!view.open_details(all, 99));
        view.close_details();
        assert!(view.snapshot(all).details.is_none());
    }
}
