//! Per-subscriber rendering of newsletter emails.
//!
//! Emails are written in Arabic and laid out right-to-left.

use crate::domain::{NewsletterKind, NewsletterRequest, Recipient};

/// Number of characters of the issue content shown in the email preview.
pub const PREVIEW_LENGTH: usize = 300;

const ELLIPSIS: &str = "...";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

pub fn heading(kind: NewsletterKind) -> &'static str {
    match kind {
        NewsletterKind::Article => "مقال جديد",
        NewsletterKind::Company => "رحلة شركة جديدة",
    }
}

fn announcement(kind: NewsletterKind) -> &'static str {
    match kind {
        NewsletterKind::Article => "تم نشر مقال جديد بعنوان:",
        NewsletterKind::Company => "تم نشر رحلة شركة جديدة بعنوان:",
    }
}

pub fn subject(request: &NewsletterRequest) -> String {
    format!("{}: {}", heading(request.kind()), request.title())
}

/// The first [`PREVIEW_LENGTH`] characters of `content`, followed by an
/// ellipsis. The cut is by character count and may land inside a word or a
/// markup tag.
pub fn preview(content: &str) -> String {
    let mut preview: String = content.chars().take(PREVIEW_LENGTH).collect();
    preview.push_str(ELLIPSIS);
    preview
}

/// The subscriber name is escaped. Title and content are inserted as given,
/// since the content may carry markup of its own.
pub fn render(request: &NewsletterRequest, recipient: &Recipient, site_url: &str) -> RenderedEmail {
    let kind = request.kind();
    let html = format!(
        r#"
        <html dir="rtl">
          <body style="font-family: Arial, sans-serif; direction: rtl; text-align: right;">
            <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
              <h1 style="color: #333; border-bottom: 2px solid #0066cc; padding-bottom: 10px;">
                {heading}
              </h1>

              <p style="font-size: 16px; color: #666;">
                مرحباً {name}،
              </p>

              <p style="font-size: 16px; color: #333;">
                {announcement}
              </p>

              <h2 style="color: #0066cc; margin: 20px 0;">
                {title}
              </h2>

              <div style="background: #f9f9f9; padding: 20px; border-radius: 8px; margin: 20px 0;">
                {preview}
              </div>

              <div style="text-align: center; margin: 30px 0;">
                <a href="{site_url}"
                   style="background: #0066cc; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block;">
                  اقرأ المزيد
                </a>
              </div>

              <hr style="margin: 30px 0; border: none; border-top: 1px solid #eee;">

              <p style="font-size: 14px; color: #999; text-align: center;">
                تم إرسال هذه الرسالة لأنك مشترك في النشرة البريدية لدينا.
                <br>
                إذا كنت لا ترغب في استقبال هذه الرسائل، يمكنك إلغاء الاشتراك في أي وقت.
              </p>
            </div>
          </body>
        </html>
        "#,
        heading = heading(kind),
        name = htmlescape::encode_minimal(recipient.name.as_ref()),
        announcement = announcement(kind),
        title = request.title(),
        preview = preview(request.content()),
        site_url = site_url,
    );
    RenderedEmail {
        subject: subject(request),
        html,
    }
}
