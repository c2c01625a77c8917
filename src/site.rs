//! Page initialization and event routing
//!
//! [`Site::init`] binds every behavior once the document is ready. Each
//! behavior is optional; the page works with whichever anchors it has.
//! Behaviors never talk to each other, they only share the document.

use crate::browser::Browser;
use crate::config::SiteConfig;
use crate::dom::{Document, NodeId};
use crate::state::forms::{FormValidator, SubmitError, SubmitOutcome};
use crate::widgets::{
    Accordion, CountTiming, CountUp, Modal, NavToggle, ScrollSpy, ScrollToTop, SmoothScroll,
};
use std::time::Instant;

#[derive(Debug)]
pub struct Site {
    nav: Option<NavToggle>,
    scroll_spy: Option<ScrollSpy>,
    smooth_scroll: Option<SmoothScroll>,
    scroll_top: Option<ScrollToTop>,
    count_up: Option<CountUp>,
    modal: Option<Modal>,
    accordion: Option<Accordion>,
    form: Option<FormValidator>,
    last_scroll_y: f64,
}

impl Site {
    pub fn init(doc: &mut Document, config: &SiteConfig, now: Instant) -> Self {
        doc.viewport.set_smooth_duration(config.smooth_scroll());
        let timing = CountTiming::new(config.count_up_duration(), config.tick());

        let site = Self {
            nav: NavToggle::bind(doc, config.nav_breakpoint),
            scroll_spy: ScrollSpy::bind(doc, config.scroll_spy_offset),
            smooth_scroll: SmoothScroll::bind(doc, config.header_height),
            scroll_top: ScrollToTop::bind(doc, config.scroll_top_threshold),
            count_up: CountUp::bind(doc, timing, now),
            modal: Modal::bind(doc),
            accordion: Accordion::bind(doc),
            form: FormValidator::bind(doc, config),
            last_scroll_y: doc.viewport.scroll_y,
        };
        tracing::info!("Page initialized with {}", site.bound_widgets().join(", "));
        site
    }

    /// Names of the behaviors that found their anchors
    pub fn bound_widgets(&self) -> Vec<&'static str> {
        [
            ("nav-toggle", self.nav.is_some()),
            ("scroll-spy", self.scroll_spy.is_some()),
            ("smooth-scroll", self.smooth_scroll.is_some()),
            ("scroll-to-top", self.scroll_top.is_some()),
            ("count-up", self.count_up.is_some()),
            ("modal", self.modal.is_some()),
            ("accordion", self.accordion.is_some()),
            ("form", self.form.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, bound)| bound.then_some(name))
        .collect()
    }

    pub fn form(&self) -> Option<&FormValidator> {
        self.form.as_ref()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn nav(&self) -> Option<&NavToggle> {
        self.nav.as_ref()
    }

    pub fn count_up(&self) -> Option<&CountUp> {
        self.count_up.as_ref()
    }

    /// Dispatch a click on `target` to every behavior.
    /// Returns true if a behavior prevented the default action.
    pub fn click(&mut self, doc: &mut Document, target: NodeId, now: Instant) -> bool {
        let mut prevented = false;
        if let Some(nav) = &self.nav {
            nav.click(doc, target);
        }
        if let Some(modal) = &mut self.modal {
            prevented |= modal.click(doc, target);
        }
        if let Some(accordion) = &self.accordion {
            accordion.click(doc, target);
        }
        if let Some(smooth_scroll) = &self.smooth_scroll {
            prevented |= smooth_scroll.click(doc, target, now);
        }
        if let Some(scroll_top) = &self.scroll_top {
            scroll_top.click(doc, target, now);
        }
        if let Some(form) = &mut self.form {
            let hit_submit = form
                .submit_button()
                .is_some_and(|button| doc.contains(button, target) && !doc.is_disabled(button));
            if hit_submit {
                form.submit(doc, now);
                prevented = true;
            }
        }
        prevented
    }

    /// Value of `target` changed
    pub fn input(&mut self, doc: &mut Document, target: NodeId) -> bool {
        self.form
            .as_mut()
            .is_some_and(|form| form.input(doc, target))
    }

    /// Focus left `target`
    pub fn blur(&mut self, doc: &mut Document, target: NodeId) -> Option<bool> {
        self.form.as_mut().and_then(|form| form.blur(doc, target))
    }

    /// Implicit submission from a field inside the form
    pub fn submit_from(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        now: Instant,
    ) -> Option<SubmitOutcome> {
        let form = self.form.as_mut()?;
        if !doc.contains(form.form(), target) {
            return None;
        }
        Some(form.submit(doc, now))
    }

    /// The viewport moved
    pub fn scrolled(&mut self, doc: &mut Document, now: Instant) {
        self.last_scroll_y = doc.viewport.scroll_y;
        if let Some(scroll_spy) = &mut self.scroll_spy {
            scroll_spy.update(doc);
        }
        if let Some(scroll_top) = &self.scroll_top {
            scroll_top.update(doc);
        }
        if let Some(count_up) = &mut self.count_up {
            count_up.observe(doc, now);
        }
    }

    /// Escape pressed. Returns true if it closed a dialog.
    pub fn escape(&mut self, doc: &mut Document) -> bool {
        self.modal.as_mut().is_some_and(|modal| modal.close(doc))
    }

    /// Drive every timer to `now`. Returns the submission result when one settles.
    pub fn tick(
        &mut self,
        doc: &mut Document,
        browser: &mut dyn Browser,
        now: Instant,
    ) -> Option<Result<(), SubmitError>> {
        doc.advance(now);
        if doc.viewport.scroll_y != self.last_scroll_y {
            self.scrolled(doc, now);
        }
        if let Some(count_up) = &mut self.count_up {
            count_up.tick(doc, now);
        }
        self.form
            .as_mut()
            .and_then(|form| form.tick(doc, browser, now))
    }
}
