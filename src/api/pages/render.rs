//! HTML for the form and terminal views

use crate::domain::signup::{FormState, Notification};
use crate::domain::waitlist::TargetLanguage;

const SHARE_LINK: &str = "lody.app/waitlist?ref=your-code";

const STYLE: &str = r#"
body{margin:0;font-family:"Josefin Sans",system-ui,sans-serif;color:#1f2937;
background:linear-gradient(135deg,#fdf8ef,#d9f5ec,#bfeff0);min-height:100vh}
section{padding:5rem 1rem;text-align:center}
.hero{min-height:80vh;display:flex;flex-direction:column;align-items:center;justify-content:center}
.badge{display:inline-block;background:rgba(255,255,255,.3);border-radius:999px;padding:.5rem 1rem;font-size:.9rem}
h1{font-size:3.5rem;margin:1.5rem 0}
.accent{background:linear-gradient(90deg,#14b8a6,#9333ea);-webkit-background-clip:text;color:transparent}
.lead{font-size:1.3rem;color:#4b5563;max-width:40rem;margin:0 auto 2rem}
.cta,button{border:0;border-radius:.5rem;padding:.9rem 2rem;font-weight:600;color:#fff;cursor:pointer;
background:linear-gradient(90deg,#14b8a6,#9333ea);text-decoration:none;display:inline-block}
button[disabled]{opacity:.6;cursor:wait}
.features{display:grid;grid-template-columns:repeat(auto-fit,minmax(16rem,1fr));gap:2rem;max-width:72rem;margin:0 auto}
.card{background:rgba(255,255,255,.45);border-radius:1rem;padding:2rem;box-shadow:0 10px 25px rgba(0,0,0,.08)}
form{max-width:28rem;margin:0 auto;text-align:left;background:rgba(255,255,255,.5);padding:2rem;border-radius:1rem}
label{display:block;font-weight:500;margin:1rem 0 .4rem}
input,select{width:100%;box-sizing:border-box;padding:.7rem;border:1px solid #e5e7eb;border-radius:.4rem;background:rgba(255,255,255,.7)}
form button{width:100%;margin-top:1.5rem}
.toasts{position:fixed;top:1rem;right:1rem;display:flex;flex-direction:column;gap:.5rem;z-index:10}
.toast{background:#fff;border-radius:.5rem;padding:1rem 1.25rem;box-shadow:0 8px 20px rgba(0,0,0,.12);max-width:22rem;text-align:left}
.toast.warning,.toast.error{background:#dc2626;color:#fff}
.toast strong{display:block;margin-bottom:.25rem}
.terminal{min-height:100vh;display:flex;align-items:center;justify-content:center;padding:1rem}
.terminal .panel{max-width:28rem;text-align:center}
.share{background:rgba(255,255,255,.5);border-radius:.5rem;padding:1rem;margin:1.5rem 0}
.share input{font-size:.9rem}
.back{background:#fff;color:#1f2937;border:1px solid #d1d5db}
footer{padding:3rem 1rem;text-align:center;color:#6b7280}
"#;

/// Disables the button while the POST is outstanding
const SUBMIT_SCRIPT: &str = r#"
document.getElementById('waitlist-form').addEventListener('submit', function () {
  var button = document.getElementById('join-button');
  button.disabled = true;
  button.textContent = 'Joining...';
});
"#;

/// Escapes text for element content and quoted attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Lody - Learn Languages Through Music</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n"
    )
}

fn toasts(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"toasts\" role=\"status\" aria-live=\"polite\">");

    for notification in notifications {
        html.push_str(&format!(
            "<div class=\"toast {}\"><strong>{}</strong><span>{}</span></div>",
            notification.severity.as_str(),
            escape_html(&notification.title),
            escape_html(&notification.description)
        ));
    }

    html.push_str("</div>");
    html
}

fn language_options(selected: Option<TargetLanguage>) -> String {
    let mut html = String::from("<option value=\"\">Select a language</option>");

    for language in TargetLanguage::ALL {
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>",
            language.code(),
            if selected == Some(language) { " selected" } else { "" },
            language.label()
        ));
    }

    html
}

/// Hero, about, features, the signup form and the footer
pub fn form_page(form: &FormState, notifications: &[Notification]) -> String {
    let disabled = if form.is_submitting() { " disabled" } else { "" };
    let button_label = if form.is_submitting() {
        "Joining..."
    } else {
        "Join the Waitlist 🎶"
    };

    let body = format!(
        r##"{toasts}
<section class="hero">
  <span class="badge">🎵 Coming Soon</span>
  <h1>Learn Languages<br><span class="accent">Through Music</span></h1>
  <p class="lead">Get your daily language vitamin with curated songs, smart vocab, and listening streaks.</p>
  <a class="cta" href="#waitlist">Join the Waitlist 🎵</a>
</section>
<section class="about">
  <h2>Your Daily Language Vitamin</h2>
  <p class="lead">Forget boring textbooks and endless grammar drills. Lody makes language learning feel like discovering your new favorite playlist. Each day, we serve up bite-sized lessons wrapped in the universal language of music, because the best learning happens when you don't even realize you're studying.</p>
</section>
<section>
  <h2>How Lody Works</h2>
  <div class="features">
    <div class="card"><h3>Daily Song Drops</h3><p>Discover new music while learning. Each song is carefully curated to match your level and interests.</p></div>
    <div class="card"><h3>Smart Vocab</h3><p>Learn words in context. Our AI highlights key vocabulary and phrases that stick in your memory.</p></div>
    <div class="card"><h3>Listening Streaks</h3><p>Build habits that last. Track your progress and maintain momentum with personalized streaks.</p></div>
  </div>
</section>
<section id="waitlist">
  <h2>Join the Waitlist</h2>
  <p class="lead">Be the first to know when Lody launches. No spam, just music and language learning magic.</p>
  <form id="waitlist-form" method="post" action="/waitlist">
    <label for="email">Email Address *</label>
    <input id="email" name="email" type="email" placeholder="your@email.com" value="{email}">
    <label for="language">Which language interests you most?</label>
    <select id="language" name="target_language">{options}</select>
    <button id="join-button" type="submit"{disabled}>{button_label}</button>
  </form>
</section>
<footer>
  <p>❤ Made with love for language learners</p>
  <p><small>© 2024 Lody. All rights reserved.</small></p>
</footer>
<script>{SUBMIT_SCRIPT}</script>"##,
        toasts = toasts(notifications),
        email = escape_html(form.email()),
        options = language_options(form.target_language()),
    );

    document(&body)
}

/// Confirmation shown after a successful registration
pub fn terminal_page(notifications: &[Notification]) -> String {
    let body = format!(
        r#"{toasts}
<div class="terminal">
  <div class="panel">
    <div style="font-size:4rem">🎉</div>
    <h1>You're in! 🎶</h1>
    <p>Welcome to the Lody family! We'll send you updates as we get closer to launch.</p>
    <div class="share">
      <p>Share with friends:</p>
      <input type="text" value="{SHARE_LINK}" readonly>
    </div>
    <a class="cta back" href="/">Back to Home</a>
  </div>
</div>"#,
        toasts = toasts(notifications),
    );

    document(&body)
}
