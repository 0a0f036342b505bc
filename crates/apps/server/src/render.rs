//! HTML fragments for the globe's hover tooltip and detail card.

use std::fmt::{self, Write};

use layers::labels::{CountryCardView, TooltipView};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn write_tooltip<W: Write>(w: &mut W, view: &TooltipView) -> fmt::Result {
    writeln!(w, "<div class=\"country-tooltip\">")?;
    writeln!(
        w,
        "<div class=\"tooltip-header\"><span class=\"flag\">{}</span> <span class=\"name\">{}</span></div>",
        html_escape(&view.header.flag),
        html_escape(&view.header.name)
    )?;
    writeln!(
        w,
        "<div class=\"official-name\">{}</div>",
        html_escape(&view.official_name)
    )?;
    if let Some(capital) = &view.capital {
        writeln!(w, "<div><strong>Capital:</strong> {}</div>", html_escape(capital))?;
    }
    writeln!(w, "<div><strong>Region:</strong> {}</div>", html_escape(&view.region))?;
    writeln!(
        w,
        "<div><strong>Population:</strong> {}</div>",
        html_escape(&view.population)
    )?;
    writeln!(
        w,
        "<div><strong>Languages ({}):</strong> {}</div>",
        view.language_count,
        html_escape(&view.languages)
    )?;
    if let Some(currency) = &view.currency {
        writeln!(w, "<div><strong>Currency:</strong> {}</div>", html_escape(currency))?;
    }
    if let Some(timezones) = &view.timezones {
        writeln!(w, "<div><strong>Timezones:</strong> {}</div>", html_escape(timezones))?;
    }
    writeln!(w, "</div>")
}

pub fn write_card<W: Write>(w: &mut W, view: &CountryCardView) -> fmt::Result {
    writeln!(w, "<div class=\"country-card\">")?;

    // Header
    writeln!(
        w,
        "<div class=\"card-header\"><span class=\"flag\">{}</span><span class=\"name\">{}</span></div>",
        html_escape(&view.header.flag),
        html_escape(&view.header.name)
    )?;
    writeln!(
        w,
        "<div class=\"official-name\">{}</div>",
        html_escape(&view.official_name)
    )?;

    writeln!(w, "<div class=\"fact-grid\">")?;
    for fact in &view.facts {
        writeln!(
            w,
            "<div class=\"fact\"><div class=\"fact-label\">{}</div><div class=\"fact-value\">{}</div></div>",
            html_escape(&fact.label),
            html_escape(&fact.value)
        )?;
    }
    writeln!(w, "</div>")?;

    writeln!(w, "<div class=\"languages\">")?;
    writeln!(
        w,
        "<div class=\"section-title\">Languages Spoken ({})</div>",
        view.language_count
    )?;
    writeln!(w, "<div class=\"tag-list\">")?;
    for tag in &view.language_tags {
        writeln!(w, "<span class=\"tag\">{}</span>", html_escape(tag))?;
    }
    writeln!(w, "</div>")?;
    writeln!(w, "</div>")?;

    if let Some(divisions) = &view.divisions {
        writeln!(w, "<div class=\"divisions\">")?;
        writeln!(
            w,
            "<div class=\"section-title\">Administrative Divisions ({})</div>",
            divisions.count
        )?;
        for division in &divisions.items {
            write!(
                w,
                "<div class=\"division\"><span class=\"division-name\">{}</span>",
                html_escape(&division.name)
            )?;
            if let Some(languages) = &division.languages {
                write!(
                    w,
                    "<span class=\"division-languages\">{}</span>",
                    html_escape(languages)
                )?;
            }
            writeln!(w, "</div>")?;
        }
        writeln!(w, "</div>")?;
    }

    if let Some(footer) = &view.footer {
        writeln!(w, "<div class=\"card-footer\">")?;
        if let Some(currency) = &footer.currency {
            writeln!(w, "<div>Currency: {}</div>", html_escape(currency))?;
        }
        if let Some(timezones) = &footer.timezones {
            writeln!(w, "<div>Timezones: {}</div>", html_escape(timezones))?;
        }
        writeln!(w, "</div>")?;
    }

    writeln!(w, "</div>")
}

pub fn tooltip_html(view: &TooltipView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_tooltip(&mut out, view)?;
    Ok(out)
}

/// Card markup, or the empty string when there is no card to show.
pub fn card_html(view: Option<&CountryCardView>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if let Some(view) = view {
        write_card(&mut out, view)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{card_html, html_escape, tooltip_html};
    use catalog::record::CountryRecord;
    use foundation::coords::LatLng;
    use layers::labels::{card_view, tooltip_view};
    use pretty_assertions::assert_eq;

    fn record() -> CountryRecord {
        CountryRecord {
            capital: "<script>alert(1)</script>".to_string(),
            languages: vec!["Tom & Jerry".to_string()],
            currencies: Some("Euro".to_string()),
            ..CountryRecord::new("Côte d'Ivoire", "Republic of \"Côte\"", LatLng::new(8.0, -5.0))
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn tooltip_escapes_record_text() {
        let html = tooltip_html(&tooltip_view(&record())).expect("render");
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("Côte d&#39;Ivoire"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Currency:</strong> Euro"));
        assert!(!html.contains("Timezones"));
    }

    #[test]
    fn card_lists_facts_and_tags() {
        let html = card_html(Some(&card_view(&record()))).expect("render");
        assert!(html.contains("Languages Spoken (1)"));
        assert!(html.contains("<span class=\"tag\">Tom &amp; Jerry</span>"));
        assert!(html.contains("Republic of &quot;Côte&quot;"));
        assert!(html.contains("<div>Currency: Euro</div>"));
        assert!(!html.contains("Administrative Divisions"));
    }

    #[test]
    fn timezones_label_in_tooltip_and_card() {
        let record = CountryRecord {
            timezones: Some("UTC-05:00, UTC-06:00".to_string()),
            ..record()
        };
        let tooltip = tooltip_html(&tooltip_view(&record)).expect("render");
        assert!(tooltip.contains("<strong>Timezones:</strong> UTC-05:00, UTC-06:00"));
        let card = card_html(Some(&card_view(&record))).expect("render");
        assert!(card.contains("<div>Timezones: UTC-05:00, UTC-06:00</div>"));
    }

    #[test]
    fn missing_card_renders_empty() {
        assert_eq!(card_html(None).expect("render"), "");
    }
}
