//! Server-rendered HTML for the public pages.
//!
//! Every caller-supplied or upstream-supplied string passes through
//! [`escape_html`] before it is interpolated.

use std::fmt::Write as _;

use crate::contact::ContactStatus;
use crate::projects::ProjectCard;

const SITE_NAME: &str = "Portfolio";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(html, "<title>{}</title>", escape_html(title)).expect("write title");
    html.push_str("</head>\n<body>\n<nav>");
    html.push_str("<a href=\"/\">Home</a> <a href=\"/projects\">Projects</a> <a href=\"/contact\">Contact</a>");
    html.push_str("</nav>\n<main>\n");
    html.push_str(body);
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}

pub fn index() -> String {
    let body = format!(
        "<h1>{SITE_NAME}</h1>\n<p>Software projects, experiments, and a way to get in touch.</p>\n\
         <p><a href=\"/projects\">Browse projects</a> or <a href=\"/contact\">send a message</a>.</p>"
    );
    layout(&format!("{SITE_NAME} - Homepage"), &body)
}

pub fn contact(status: ContactStatus) -> String {
    let mut body = String::new();
    writeln!(
        body,
        "<section id=\"contact\" data-status=\"{}\">",
        status.label()
    )
    .expect("write section");
    body.push_str("<h1>Contact</h1>\n");

    match status {
        ContactStatus::NotSubmitted => {}
        ContactStatus::Accepted => {
            body.push_str("<p class=\"status success\">Thanks! Your message has been received.</p>\n");
        }
        ContactStatus::Rejected => {
            body.push_str(
                "<p class=\"status error\">Please fill in every field and use a phone number of 10 to 13 digits.</p>\n",
            );
        }
    }

    body.push_str(
        "<form method=\"post\" action=\"/contact\">\n\
         <label>Name <input name=\"name\" maxlength=\"80\" required></label>\n\
         <label>Email <input name=\"email\" type=\"email\" maxlength=\"100\" required></label>\n\
         <label>Phone <input name=\"phone\" inputmode=\"numeric\" pattern=\"[0-9]{10,13}\" required></label>\n\
         <label>Reason <textarea name=\"reason\" maxlength=\"300\" required></textarea></label>\n\
         <button type=\"submit\">Send</button>\n\
         </form>\n</section>",
    );

    layout("Contact", &body)
}

pub fn projects(cards: &[ProjectCard]) -> String {
    let mut body = String::from("<h1>Projects</h1>\n");

    if cards.is_empty() {
        body.push_str("<p class=\"empty\">No projects to show right now.</p>\n");
    } else {
        body.push_str("<ul class=\"cards\">\n");
        for card in cards {
            writeln!(
                body,
                "<li class=\"card\"><a href=\"{}\">{}</a>",
                escape_html(&card.html_url),
                escape_html(&card.name)
            )
            .expect("write card link");
            if let Some(description) = card.description.as_deref() {
                writeln!(body, "<p>{}</p>", escape_html(description)).expect("write description");
            }
            if let Some(language) = card.language.as_deref() {
                writeln!(body, "<span class=\"language\">{}</span>", escape_html(language))
                    .expect("write language");
            }
            writeln!(
                body,
                "<span class=\"stars\">{} stars</span></li>",
                card.stargazers_count
            )
            .expect("write stars");
        }
        body.push_str("</ul>\n");
    }

    layout("Projects", &body)
}

pub fn error(message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p><a href=\"/\">Back to the homepage</a></p>",
        escape_html(message)
    );
    layout(message, &body)
}
