//! Built-in contact page shown by the terminal preview
//!
//! Layout is in page pixels on an 18px line grid, so every element maps
//! onto whole terminal rows.

use crate::dom::style::SCROLL_TOP_ATTR;
use crate::dom::{Document, Element, NodeId, Viewport};
use crate::widgets::{COUNT_ATTR, MODAL_ATTR, MODAL_CLOSE_ATTR};

/// One line of page text
pub const LINE: f64 = 18.0;

/// Sections linked from the navigation, in page order
pub const SECTIONS: &[(&str, &str)] = &[
    ("domov", "Domov"),
    ("sluzby", "Služby"),
    ("cisla", "V číslach"),
    ("faq", "Časté otázky"),
    ("kontakt", "Kontakt"),
];

const FAQ: &[(&str, &str)] = &[
    (
        "Ako dlho trvá výroba okien?",
        "Štandardne štyri až šesť týždňov od zamerania.",
    ),
    (
        "Poskytujete montáž aj demontáž?",
        "Áno, staré okná odvezieme a ekologicky zlikvidujeme.",
    ),
    (
        "Aká je záruka?",
        "Na profily dávame desať rokov, na kovanie päť rokov.",
    ),
];

const COUNTERS: &[(&str, &str)] = &[
    ("1500", "spokojných zákazníkov"),
    ("250", "zákaziek ročne"),
    ("12", "rokov na trhu"),
];

/// Build the contact page inside `viewport`
pub fn contact_page(viewport: Viewport) -> Document {
    let mut doc = Document::new(viewport);
    let body = doc.body();
    header(&mut doc, body);

    let mut top = 72.0;
    top = home(&mut doc, body, top);
    top = services(&mut doc, body, top);
    top = stats(&mut doc, body, top);
    top = faq(&mut doc, body, top);
    top = contact(&mut doc, body, top);

    let footer = doc.append(body, Element::new("footer").at(top, LINE * 4.0));
    doc.append(
        footer,
        Element::new("p")
            .text("© 2026 Dr. Okná s.r.o. · Hlavná 12, Bratislava")
            .at(top + LINE, LINE),
    );

    quote_modal(&mut doc, body);
    doc.append(
        body,
        Element::new("button")
            .attr(SCROLL_TOP_ATTR, "")
            .attr("aria-label", "Späť hore")
            .text("↑ Hore"),
    );
    doc
}

fn header(doc: &mut Document, body: NodeId) {
    let header = doc.append(body, Element::new("header").class("dr-header").at(0.0, 72.0));
    doc.append(
        header,
        Element::new("span").class("dr-brand").text("Dr. Okná").at(LINE, LINE),
    );
    doc.append(
        header,
        Element::new("button")
            .class("dr-nav-toggle")
            .attr("aria-expanded", "false")
            .attr("aria-controls", "hlavna-navigacia")
            .text("☰ Menu")
            .at(LINE, LINE),
    );
    let panel = doc.append(
        header,
        Element::new("nav")
            .with_id("hlavna-navigacia")
            .class("dr-nav-panel")
            .attr("aria-hidden", "true")
            .at(LINE * 2.0, LINE),
    );
    for (id, label) in SECTIONS {
        doc.append(
            panel,
            Element::new("a")
                .class("nav-link")
                .attr("href", format!("#{id}"))
                .text(*label)
                .at(LINE * 2.0, LINE),
        );
    }
}

fn titled_section(doc: &mut Document, body: NodeId, id: &str, title: &str, top: f64, height: f64) -> NodeId {
    let section = doc.append(body, Element::new("section").with_id(id).at(top, height));
    doc.append(section, Element::new("h2").text(title).at(top + LINE, LINE));
    section
}

fn home(doc: &mut Document, body: NodeId, top: f64) -> f64 {
    let height = LINE * 12.0;
    let section = doc.append(body, Element::new("section").with_id("domov").at(top, height));
    doc.append(
        section,
        Element::new("h1").text("Okná a dvere na mieru").at(top + LINE, LINE),
    );
    doc.append(
        section,
        Element::new("p")
            .text("Plastové a drevené okná s montážou po celom Slovensku.")
            .at(top + LINE * 3.0, LINE),
    );
    doc.append(
        section,
        Element::new("a")
            .class("btn btn-primary")
            .attr("href", "#kontakt")
            .text("Nezáväzná ponuka")
            .at(top + LINE * 5.0, LINE),
    );
    doc.append(
        section,
        Element::new("button")
            .class("btn btn-outline")
            .attr(MODAL_ATTR, "quoteModal")
            .text("Rýchla cenová ponuka")
            .at(top + LINE * 7.0, LINE),
    );
    top + height
}

fn services(doc: &mut Document, body: NodeId, top: f64) -> f64 {
    let height = LINE * 10.0;
    let section = titled_section(doc, body, "sluzby", "Služby", top, height);
    for (i, service) in [
        "Zameranie a poradenstvo zdarma",
        "Výroba plastových a drevených okien",
        "Montáž, demontáž a odvoz starých okien",
        "Servis a nastavenie kovania",
    ]
    .iter()
    .enumerate()
    {
        doc.append(
            section,
            Element::new("p")
                .text(format!("• {service}"))
                .at(top + LINE * (3.0 + i as f64), LINE),
        );
    }
    top + height
}

fn stats(doc: &mut Document, body: NodeId, top: f64) -> f64 {
    let height = LINE * 12.0;
    let section = titled_section(doc, body, "cisla", "V číslach", top, height);
    for (i, (count, label)) in COUNTERS.iter().enumerate() {
        let row = top + LINE * (3.0 + 3.0 * i as f64);
        doc.append(
            section,
            Element::new("span")
                .class("counter")
                .attr(COUNT_ATTR, *count)
                .text("0")
                .at(row, LINE),
        );
        doc.append(section, Element::new("p").text(*label).at(row + LINE, LINE));
    }
    top + height
}

fn faq(doc: &mut Document, body: NodeId, top: f64) -> f64 {
    let height = LINE * (3.0 + 4.0 * FAQ.len() as f64);
    let section = titled_section(doc, body, "faq", "Časté otázky", top, height);
    let accordion = doc.append(
        section,
        Element::new("div")
            .class("accordion")
            .at(top + LINE * 3.0, LINE * 4.0 * FAQ.len() as f64),
    );
    for (i, (question, answer)) in FAQ.iter().enumerate() {
        let row = top + LINE * (3.0 + 4.0 * i as f64);
        let id = format!("faq-{}", i + 1);
        let open = i == 0;
        let mut button = Element::new("button")
            .class("accordion-button")
            .attr("data-bs-target", format!("#{id}"))
            .attr("aria-expanded", open.to_string())
            .text(*question)
            .at(row, LINE);
        let mut panel = Element::new("div")
            .with_id(id)
            .class("accordion-collapse collapse")
            .text(*answer)
            .at(row + LINE, LINE * 2.0);
        if open {
            panel = panel.class("show");
        } else {
            button = button.class("collapsed");
        }
        doc.append(accordion, button);
        doc.append(accordion, panel);
    }
    top + height
}

fn contact(doc: &mut Document, body: NodeId, top: f64) -> f64 {
    let fields: &[(&str, &str, &str)] = &[
        ("firstName", "Meno *", "text"),
        ("lastName", "Priezvisko *", "text"),
        ("email", "E-mail *", "email"),
        ("phone", "Telefón", "tel"),
        ("subject", "Predmet *", "text"),
        ("message", "Správa *", "textarea"),
    ];

    let form_top = top + LINE * 3.0;
    let mut row = form_top;
    let mut groups = Vec::new();
    for (id, label, kind) in fields {
        let input_height = if *kind == "textarea" { LINE * 3.0 } else { LINE };
        groups.push((row, *id, *label, *kind, input_height));
        row += LINE * 3.0 + input_height;
    }
    let consent_top = row;
    let submit_top = consent_top + LINE * 3.0;
    let form_height = submit_top + LINE * 2.0 - form_top;
    let height = form_height + LINE * 4.0;

    let section = titled_section(doc, body, "kontakt", "Kontakt", top, height);
    let form = doc.append(
        section,
        Element::new("form")
            .with_id("contactForm")
            .attr("novalidate", "")
            .at(form_top, form_height),
    );

    for (group_top, id, label, kind, input_height) in groups {
        let group = doc.append(
            form,
            Element::new("div")
                .class("mb-3")
                .at(group_top, LINE * 2.0 + input_height),
        );
        doc.append(
            group,
            Element::new("label")
                .class("form-label")
                .attr("for", id)
                .text(label)
                .at(group_top, LINE),
        );
        let input = if kind == "textarea" {
            Element::new("textarea")
        } else {
            Element::new("input").attr("type", kind)
        };
        doc.append(
            group,
            input
                .with_id(id)
                .attr("name", id)
                .class("form-control")
                .at(group_top + LINE, input_height),
        );
        doc.append(
            group,
            Element::new("div")
                .class("invalid-feedback")
                .at(group_top + LINE + input_height, LINE),
        );
    }

    let consent = doc.append(
        form,
        Element::new("div").class("form-check").at(consent_top, LINE * 2.0),
    );
    doc.append(
        consent,
        Element::new("input")
            .with_id("privacyConsent")
            .attr("name", "privacyConsent")
            .attr("type", "checkbox")
            .class("form-check-input")
            .text("Súhlasím so spracovaním osobných údajov *")
            .at(consent_top, LINE),
    );
    doc.append(
        consent,
        Element::new("div")
            .class("invalid-feedback")
            .at(consent_top + LINE, LINE),
    );

    doc.append(
        form,
        Element::new("button")
            .attr("type", "submit")
            .class("btn btn-primary")
            .text("Odoslať správu")
            .at(submit_top, LINE),
    );
    top + height
}

fn quote_modal(doc: &mut Document, body: NodeId) {
    let modal = doc.append(
        body,
        Element::new("div")
            .with_id("quoteModal")
            .class("modal")
            .attr("role", "dialog")
            .attr("aria-hidden", "true"),
    );
    doc.append(modal, Element::new("h5").text("Rýchla cenová ponuka"));
    doc.append(
        modal,
        Element::new("p").text("Zavolajte nám na +421 900 123 456, ozveme sa do 24 hodín."),
    );
    doc.append(
        modal,
        Element::new("button")
            .attr(MODAL_CLOSE_ATTR, "")
            .class("btn")
            .text("Zavrieť"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::CONTACT_FIELDS;
    use pretty_assertions::assert_eq;

    fn page() -> Document {
        contact_page(Viewport::new(1024.0, 540.0))
    }

    #[test]
    fn test_every_nav_link_resolves() {
        let doc = page();
        let links = doc.by_class("nav-link");
        assert_eq!(links.len(), SECTIONS.len());
        for link in links {
            let href = doc.attr(link, "href").unwrap();
            assert!(doc.by_fragment(href).is_some(), "{href}");
        }
    }

    #[test]
    fn test_form_carries_every_contact_field() {
        let doc = page();
        let form = doc.by_id("contactForm").unwrap();
        for (id, _) in CONTACT_FIELDS {
            let field = doc.by_id(id).unwrap();
            assert!(doc.contains(form, field), "{id}");
        }
    }

    #[test]
    fn test_sections_are_stacked_without_gaps() {
        let doc = page();
        let mut expected_top = 72.0;
        for (id, _) in SECTIONS {
            let layout = doc.layout(doc.by_id(id).unwrap());
            assert_eq!(layout.top, expected_top, "{id}");
            expected_top = layout.bottom();
        }
    }

    #[test]
    fn test_layout_sits_on_line_grid() {
        let doc = page();
        for node in doc.walk() {
            let layout = doc.layout(node);
            assert_eq!(layout.top % LINE, 0.0);
            assert_eq!(layout.height % LINE, 0.0);
        }
    }
}
