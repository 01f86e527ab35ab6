//! HTML rendering of a [`ThreadView`].
//!
//! Comment bodies arrive from the server already rendered and are emitted
//! as-is. Everything the user typed (drafts) and every label is escaped.

use crate::config::Labels;
use crate::forms::{FormId, FormState};
use crate::view::{CommentView, ThreadView};

pub fn to_html(view: &ThreadView, labels: &Labels) -> String {
    let mut out = String::new();
    out.push_str("<div id=\"comments\" class=\"comments\">\n");
    out.push_str(&format!(
        "  <h3 id=\"comments-header\">{} ({})</h3>\n",
        html_escape::encode_text(&labels.heading),
        view.comment_count
    ));
    out.push_str("  <div id=\"comments-list\">\n");
    for comment in &view.comments {
        render_comment(&mut out, comment, view.can_reply, labels, 2);
    }
    out.push_str("  </div>\n");
    render_form(&mut out, FormId::Main, &view.main_form, labels, 1);
    out.push_str("</div>\n");
    out
}

fn render_comment(out: &mut String, c: &CommentView, can_reply: bool, labels: &Labels, depth: usize) {
    let pad = "  ".repeat(depth);
    let id = c.comment.comment_id;
    out.push_str(&format!("{pad}<div id=\"comment-{id}\" class=\"comment\">\n"));
    if let Some(author) = &c.comment.author {
        out.push_str(&format!(
            "{pad}  <div class=\"comment-author\">{}</div>\n",
            html_escape::encode_text(author)
        ));
    }
    out.push_str(&format!("{pad}  <div class=\"comment-body\">{}</div>\n", c.comment.rendered_text));

    if c.can_modify {
        out.push_str(&format!(
            "{pad}  <button data-action=\"toggle\" data-form-id=\"{}\">{}</button>\n",
            FormId::Edit(id),
            html_escape::encode_text(&labels.edit)
        ));
        out.push_str(&format!(
            "{pad}  <button data-action=\"delete\" data-comment-id=\"{id}\">{}</button>\n",
            html_escape::encode_text(&labels.delete)
        ));
    }
    if c.edit_form.visible {
        render_form(out, FormId::Edit(id), &c.edit_form, labels, depth + 1);
    }

    for reply in &c.replies {
        render_comment(out, reply, can_reply, labels, depth + 1);
    }

    if let Some(reply_form) = &c.reply_form {
        if can_reply {
            out.push_str(&format!(
                "{pad}  <p id=\"comment-{id}-reply-toggle\" data-action=\"toggle\" data-form-id=\"{}\">{}</p>\n",
                FormId::Reply(id),
                html_escape::encode_text(&labels.reply_prompt)
            ));
            if reply_form.visible {
                render_form(out, FormId::Reply(id), reply_form, labels, depth + 1);
            }
        } else {
            out.push_str(&format!(
                "{pad}  <p><a href=\"{}\">{}</a></p>\n",
                html_escape::encode_double_quoted_attribute(&labels.login_url),
                html_escape::encode_text(&labels.login_prompt)
            ));
        }
    }
    out.push_str(&format!("{pad}</div>\n"));
}

fn render_form(out: &mut String, form: FormId, state: &FormState, labels: &Labels, depth: usize) {
    let pad = "  ".repeat(depth);
    let (kind, comment) = match form {
        FormId::Main => ("main", None),
        FormId::Reply(id) => ("reply", Some(id)),
        FormId::Edit(id) => ("edit", Some(id)),
    };
    let comment_attr = comment.map(|id| format!(" data-comment-id=\"{id}\"")).unwrap_or_default();
    out.push_str(&format!(
        "{pad}<form class=\"comment-form\" data-form-id=\"{form}\" data-form-type=\"{kind}\"{comment_attr}>\n"
    ));
    out.push_str(&format!(
        "{pad}  <textarea data-form-id=\"{form}\" placeholder=\"{}\">{}</textarea>\n",
        html_escape::encode_double_quoted_attribute(&labels.placeholder),
        html_escape::encode_text(&state.draft)
    ));
    out.push_str(&format!(
        "{pad}  <button type=\"submit\">{}</button>\n",
        html_escape::encode_text(&labels.submit)
    ));
    out.push_str(&format!("{pad}</form>\n"));
}
