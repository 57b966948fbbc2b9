//! HTML for the poll pages.

use std::fmt::Write;

use super::context::{IndexContext, QuestionContext};

pub const NO_POLLS: &str = "No polls are available.";

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/polls/style.css\">\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title),
    )
}

pub fn render_index(context: &IndexContext) -> String {
    if context.latest_question_list.is_empty() {
        return page("Polls", &format!("<p>{NO_POLLS}</p>\n"));
    }

    let mut body = String::from("<ul>\n");
    for question in &context.latest_question_list {
        // writing to a String cannot fail
        let _ = writeln!(
            body,
            "<li><a href=\"/polls/{}\">{}</a></li>",
            question.id,
            escape(&question.question_text),
        );
    }
    body.push_str("</ul>\n");
    page("Polls", &body)
}

pub fn render_detail(context: &QuestionContext) -> String {
    let question = &context.question;
    let mut body = String::new();
    let _ = writeln!(body, "<form action=\"/polls/{}/vote\" method=\"post\">", question.id);
    let _ = writeln!(body, "<fieldset>\n<legend><h1>{}</h1></legend>", escape(&question.question_text));
    if let Some(message) = &context.error_message {
        let _ = writeln!(body, "<p><strong>{}</strong></p>", escape(message));
    }
    for (n, choice) in context.choices.iter().enumerate() {
        let _ = writeln!(
            body,
            "<input type=\"radio\" name=\"choice\" id=\"choice{n}\" value=\"{}\">\n\
             <label for=\"choice{n}\">{}</label><br>",
            choice.id,
            escape(&choice.choice_text),
        );
    }
    body.push_str("</fieldset>\n<input type=\"submit\" value=\"Vote\">\n</form>\n");
    page(&question.question_text, &body)
}

pub fn render_results(context: &QuestionContext) -> String {
    let question = &context.question;
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>\n<ul>", escape(&question.question_text));
    for choice in &context.choices {
        let _ = writeln!(body, "<li>{} -- {}</li>", escape(&choice.choice_text), choice.votes_label());
    }
    let _ = writeln!(body, "</ul>\n<a href=\"/polls/{}\">Vote again?</a>", question.id);
    page(&question.question_text, &body)
}
