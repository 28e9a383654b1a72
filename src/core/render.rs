//! Server-side rendering of the portfolio page.
//!
//! The document is a pure function of [`PortfolioData`] and [`ViewState`]:
//! identical inputs always produce byte-identical HTML.

use crate::core::contact::CONTACT_FORM_PATH;
use crate::core::form::ContactForm;
use crate::domain::model::{
    About, ContactInfo, FormField, FormState, PortfolioData, Profile, Project, SocialLinks,
    SubmissionStatus, Theme,
};
use std::fmt::{self, Display, Write};

pub const SUCCESS_STATUS_TEXT: &str = "Message sent successfully!";
pub const ERROR_STATUS_TEXT: &str = "Failed to send message. Please try again later.";

/// Session-scoped UI state the page reflects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub theme: Theme,
    /// No theme was chosen: the browser replaces `theme` with its `prefers-color-scheme`.
    pub follow_system_theme: bool,
    pub form: ContactForm,
}

impl ViewState {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// An explicit theme pins the page; `None` defers to the visitor's system setting.
    pub fn from_preference(theme: Option<Theme>) -> Self {
        match theme {
            Some(theme) => Self::with_theme(theme),
            None => Self {
                follow_system_theme: true,
                ..Self::default()
            },
        }
    }
}

/// HTML-escapes text and attribute values on display.
///
/// This is the renderer's only escaping boundary. Every string interpolated into
/// the page goes through it, static labels included; the numeric project id and
/// the inline scripts (written verbatim, never formatted) are the exceptions.
pub struct Escaped<'a>(pub &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

pub fn render_page(data: &PortfolioData, view: &ViewState) -> String {
    let mut out = String::with_capacity(16 * 1024);
    // fmt::Write for String is infallible.
    let _ = write_page(&mut out, data, view);
    out
}

fn write_page(out: &mut String, data: &PortfolioData, view: &ViewState) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    write!(out, "<html lang=\"en\"")?;
    if view.theme.is_dark() {
        write!(out, " class=\"dark\"")?;
    }
    if view.follow_system_theme {
        write!(out, " data-theme-source=\"system\"")?;
    }
    writeln!(out, ">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(
        out,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    )?;
    writeln!(
        out,
        "<title>{} | {}</title>",
        Escaped(&data.profile.name),
        Escaped(&data.profile.title)
    )?;
    writeln!(out, "<script src=\"https://cdn.tailwindcss.com\"></script>")?;
    writeln!(out, "<script>tailwind.config = {{ darkMode: 'class' }};</script>")?;
    write_script(out, SYSTEM_THEME_SCRIPT);
    writeln!(out, "</head>")?;
    writeln!(
        out,
        "<body class=\"bg-gray-50 dark:bg-gray-900 text-gray-800 dark:text-gray-200 font-sans antialiased min-h-screen\">"
    )?;
    writeln!(out, "<div class=\"container mx-auto px-4 sm:px-6 lg:px-8\">")?;

    write_header(out, &data.profile, view.theme)?;
    write_about(out, &data.about)?;
    write_projects(out, &data.projects)?;
    write_contact(out, &data.contact, &data.social_links, &view.form)?;

    writeln!(out, "</div>")?;
    write_script(out, CLIENT_SCRIPT);
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_script(out: &mut String, script: &str) {
    out.push_str("<script>");
    out.push_str(script);
    out.push_str("</script>\n");
}

fn write_header(out: &mut String, profile: &Profile, theme: Theme) -> fmt::Result {
    let toggle_label = if theme.is_dark() {
        "Switch to light mode"
    } else {
        "Switch to dark mode"
    };

    writeln!(out, "<header class=\"py-24 md:py-32 lg:py-40 text-center\">")?;
    // Without scripts the toggle is a link that asks the server for the other theme.
    writeln!(
        out,
        "<a id=\"theme-toggle\" href=\"?theme={}\" role=\"button\" data-theme=\"{}\" aria-label=\"{2}\" class=\"absolute top-8 right-8 p-2 rounded-full\">{2}</a>",
        Escaped(theme.toggle().as_str()),
        Escaped(theme.as_str()),
        Escaped(toggle_label)
    )?;
    writeln!(
        out,
        "<div class=\"flex flex-col-reverse md:flex-row items-center justify-center gap-8 md:gap-16\">"
    )?;
    writeln!(out, "<div class=\"text-center md:text-left\">")?;
    writeln!(
        out,
        "<h1 class=\"text-4xl sm:text-5xl lg:text-6xl font-bold mb-2\">Hi, I'm <span class=\"text-indigo-600 dark:text-indigo-400\">{}</span></h1>",
        Escaped(&profile.name)
    )?;
    writeln!(
        out,
        "<p class=\"text-xl sm:text-2xl font-light\">{}</p>",
        Escaped(&profile.title)
    )?;
    writeln!(
        out,
        "<p class=\"mt-4 text-lg text-gray-500 dark:text-gray-400\">{}</p>",
        Escaped(&profile.tagline)
    )?;
    writeln!(out, "<div class=\"mt-8 flex flex-col sm:flex-row gap-4\">")?;
    writeln!(
        out,
        "<a href=\"#projects\" class=\"px-6 py-3 rounded-full text-white bg-indigo-600\">My Work</a>"
    )?;
    writeln!(
        out,
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"px-6 py-3 rounded-full border border-indigo-600 text-indigo-600\">Download Resume</a>",
        Escaped(&profile.resume_url)
    )?;
    writeln!(out, "</div>")?;
    writeln!(out, "</div>")?;
    writeln!(
        out,
        "<div class=\"w-48 h-48 md:w-64 md:h-64 flex-shrink-0\"><img src=\"{}\" alt=\"Profile\" class=\"w-full h-full rounded-full object-cover ring-4 ring-indigo-600\"></div>",
        Escaped(&profile.profile_pic_url)
    )?;
    writeln!(out, "</div>")?;
    writeln!(out, "</header>")
}

fn write_about(out: &mut String, about: &About) -> fmt::Result {
    writeln!(out, "<section id=\"about\" class=\"py-16 md:py-24\">")?;
    writeln!(
        out,
        "<h2 class=\"text-3xl sm:text-4xl font-bold text-center mb-12\">About Me</h2>"
    )?;
    writeln!(
        out,
        "<div class=\"max-w-4xl mx-auto bg-white dark:bg-gray-800 p-8 md:p-12 rounded-2xl shadow-lg\">"
    )?;
    writeln!(
        out,
        "<p class=\"text-lg leading-relaxed\">{}</p>",
        Escaped(&about.bio)
    )?;
    writeln!(out, "<h3 class=\"mt-8 text-xl font-semibold mb-4\">Skills</h3>")?;
    writeln!(out, "<div class=\"flex flex-wrap gap-2\">")?;
    for skill in &about.skills {
        writeln!(
            out,
            "<span class=\"skill px-4 py-2 bg-indigo-100 text-indigo-800 rounded-full text-sm\">{}</span>",
            Escaped(skill)
        )?;
    }
    writeln!(out, "</div>")?;
    writeln!(out, "</div>")?;
    writeln!(out, "</section>")
}

fn write_projects(out: &mut String, projects: &[Project]) -> fmt::Result {
    writeln!(
        out,
        "<section id=\"projects\" class=\"py-16 md:py-24 bg-gray-100 dark:bg-gray-800 rounded-3xl\">"
    )?;
    writeln!(
        out,
        "<h2 class=\"text-3xl sm:text-4xl font-bold text-center mb-12\">My Projects</h2>"
    )?;
    writeln!(
        out,
        "<div class=\"max-w-6xl mx-auto grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8 p-4\">"
    )?;
    for project in projects {
        writeln!(
            out,
            "<article class=\"project bg-white dark:bg-gray-900 rounded-2xl shadow-lg p-6\" data-project-id=\"{}\">",
            project.id
        )?;
        writeln!(
            out,
            "<h3 class=\"text-xl font-semibold mb-2\">{}</h3>",
            Escaped(&project.title)
        )?;
        writeln!(
            out,
            "<p class=\"text-sm mb-4\">{}</p>",
            Escaped(&project.description)
        )?;
        writeln!(out, "<div class=\"flex flex-wrap gap-1 mb-4\">")?;
        for tech in &project.tech_stack {
            writeln!(
                out,
                "<span class=\"tech px-2 py-1 bg-gray-200 rounded-full text-xs\">{}</span>",
                Escaped(tech)
            )?;
        }
        writeln!(out, "</div>")?;
        writeln!(
            out,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"text-sm text-indigo-600\">View on GitHub</a>",
            Escaped(&project.link)
        )?;
        writeln!(out, "</article>")?;
    }
    writeln!(out, "</div>")?;
    writeln!(out, "</section>")
}

fn write_contact(
    out: &mut String,
    contact: &ContactInfo,
    social_links: &SocialLinks,
    form: &ContactForm,
) -> fmt::Result {
    writeln!(out, "<section id=\"contact\" class=\"py-16 md:py-24\">")?;
    writeln!(
        out,
        "<h2 class=\"text-3xl sm:text-4xl font-bold text-center mb-12\">Contact Me</h2>"
    )?;
    writeln!(
        out,
        "<div class=\"max-w-4xl mx-auto bg-white dark:bg-gray-800 p-8 md:p-12 rounded-2xl shadow-lg grid grid-cols-1 md:grid-cols-2 gap-8\">"
    )?;

    writeln!(out, "<div>")?;
    writeln!(out, "<h3 class=\"text-xl font-semibold mb-4\">Get in Touch</h3>")?;
    writeln!(
        out,
        "<p class=\"mb-4\">I'm always open to new opportunities and collaborations. Feel free to reach out!</p>"
    )?;
    writeln!(
        out,
        "<p><a href=\"mailto:{0}\">{0}</a></p>",
        Escaped(&contact.email)
    )?;
    writeln!(out, "<p><span>{}</span></p>", Escaped(&contact.phone))?;
    writeln!(out, "<h3 class=\"mt-8 text-xl font-semibold mb-4\">Find Me On</h3>")?;
    writeln!(out, "<div class=\"flex space-x-4\">")?;
    for (platform, url) in social_links.entries() {
        writeln!(
            out,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"social text-gray-500\">{}</a>",
            Escaped(url),
            Escaped(platform)
        )?;
    }
    writeln!(out, "</div>")?;
    writeln!(out, "</div>")?;

    write_form(out, form)?;

    writeln!(out, "</div>")?;
    writeln!(out, "</section>")
}

fn write_form(out: &mut String, form: &ContactForm) -> fmt::Result {
    let state = form.state();

    writeln!(out, "<div>")?;
    writeln!(out, "<h3 class=\"text-xl font-semibold mb-4\">Send me a message</h3>")?;
    writeln!(
        out,
        "<form id=\"contact-form\" action=\"{}\" method=\"post\" class=\"space-y-4\">",
        Escaped(CONTACT_FORM_PATH)
    )?;
    write_input(out, state, FormField::Name, "Name", "text", "Your Name")?;
    write_input(out, state, FormField::Email, "Email", "email", "you@example.com")?;
    writeln!(
        out,
        "<div><label for=\"{0}\" class=\"block text-sm font-medium\">Message</label><textarea id=\"{0}\" name=\"{0}\" rows=\"4\" placeholder=\"Your Message...\" required>{1}</textarea></div>",
        Escaped(FormField::Message.as_str()),
        Escaped(state.get(FormField::Message))
    )?;

    match form.status() {
        SubmissionStatus::Success => writeln!(
            out,
            "<p id=\"form-status\" class=\"text-green-500 text-sm\" role=\"status\">{}</p>",
            Escaped(SUCCESS_STATUS_TEXT)
        )?,
        SubmissionStatus::Error => writeln!(
            out,
            "<p id=\"form-status\" class=\"text-red-500 text-sm\" role=\"status\">{}</p>",
            Escaped(ERROR_STATUS_TEXT)
        )?,
        SubmissionStatus::Idle => writeln!(
            out,
            "<p id=\"form-status\" class=\"text-sm\" role=\"status\"></p>"
        )?,
    }

    if form.is_loading() {
        writeln!(
            out,
            "<button type=\"submit\" disabled class=\"w-full py-3 px-6 rounded-full text-white bg-indigo-400 cursor-not-allowed\">Sending...</button>"
        )?;
    } else {
        writeln!(
            out,
            "<button type=\"submit\" class=\"w-full py-3 px-6 rounded-full text-white bg-indigo-600 hover:bg-indigo-700\">Send Message</button>"
        )?;
    }

    writeln!(out, "</form>")?;
    writeln!(out, "</div>")
}

fn write_input(
    out: &mut String,
    state: &FormState,
    field: FormField,
    label: &str,
    input_type: &str,
    placeholder: &str,
) -> fmt::Result {
    writeln!(
        out,
        "<div><label for=\"{0}\" class=\"block text-sm font-medium\">{1}</label><input type=\"{2}\" id=\"{0}\" name=\"{0}\" value=\"{3}\" placeholder=\"{4}\" class=\"mt-1 block w-full rounded-md\" required></div>",
        Escaped(field.as_str()),
        Escaped(label),
        Escaped(input_type),
        Escaped(state.get(field)),
        Escaped(placeholder)
    )
}

// Runs in <head> so a system-themed page never paints in the wrong theme.
const SYSTEM_THEME_SCRIPT: &str = r#"
(function () {
  var root = document.documentElement;
  if (root.getAttribute('data-theme-source') !== 'system' || !window.matchMedia) { return; }
  root.classList.toggle('dark', window.matchMedia('(prefers-color-scheme: dark)').matches);
})();
"#;

// Progressive enhancement: JSON submission and theme toggling in the browser.
const CLIENT_SCRIPT: &str = r#"
(function () {
  var root = document.documentElement;
  var toggle = document.getElementById('theme-toggle');
  if (toggle) {
    var syncToggle = function (dark) {
      var label = dark ? 'Switch to light mode' : 'Switch to dark mode';
      toggle.textContent = label;
      toggle.setAttribute('aria-label', label);
      toggle.setAttribute('data-theme', dark ? 'dark' : 'light');
      toggle.setAttribute('href', '?theme=' + (dark ? 'light' : 'dark'));
    };
    syncToggle(root.classList.contains('dark'));
    toggle.addEventListener('click', function (e) {
      e.preventDefault();
      syncToggle(root.classList.toggle('dark'));
    });
  }
  var form = document.getElementById('contact-form');
  if (!form) { return; }
  var status = document.getElementById('form-status');
  var button = form.querySelector('button[type=submit]');
  form.addEventListener('submit', function (e) {
    e.preventDefault();
    if (button.disabled) { return; }
    button.disabled = true;
    button.textContent = 'Sending...';
    status.textContent = '';
    var fields = form.elements;
    var payload = { name: fields['name'].value, email: fields['email'].value, message: fields['message'].value };
    fetch(form.getAttribute('action'), { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(payload) })
      .then(function (r) { return r.json().then(function () { return r.ok; }); })
      .then(function (ok) {
        status.className = ok ? 'text-green-500 text-sm' : 'text-red-500 text-sm';
        status.textContent = ok ? 'Message sent successfully!' : 'Failed to send message. Please try again later.';
        if (ok) { form.reset(); }
      })
      .catch(function () {
        status.className = 'text-red-500 text-sm';
        status.textContent = 'Failed to send message. Please try again later.';
      })
      .finally(function () {
        button.disabled = false;
        button.textContent = 'Send Message';
      });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_covers_markup_characters() {
        assert_eq!(
            Escaped(r#"<a href="x">Tom & 'Jerry'</a>"#).to_string(),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_sections_in_order() {
        let html = render_page(&PortfolioData::default(), &ViewState::default());
        let header = html.find("<header").unwrap();
        let about = html.find("id=\"about\"").unwrap();
        let projects = html.find("id=\"projects\"").unwrap();
        let contact = html.find("id=\"contact\"").unwrap();
        assert!(header < about && about < projects && projects < contact);
    }

    #[test]
    fn test_dark_theme_marks_root() {
        let data = PortfolioData::default();
        let dark = render_page(&data, &ViewState::with_theme(Theme::Dark));
        let light = render_page(&data, &ViewState::with_theme(Theme::Light));
        assert!(dark.contains("<html lang=\"en\" class=\"dark\">"));
        assert!(light.contains("<html lang=\"en\">"));
        assert!(dark.contains("Switch to light mode"));
        assert!(dark.contains("href=\"?theme=light\""));
        assert!(light.contains("href=\"?theme=dark\""));
        assert!(!dark.contains("data-theme-source"));
    }

    #[test]
    fn test_unset_theme_follows_system() {
        let data = PortfolioData::default();
        let system = render_page(&data, &ViewState::from_preference(None));
        assert!(system.contains("<html lang=\"en\" data-theme-source=\"system\">"));
        assert!(system.contains("matchMedia('(prefers-color-scheme: dark)')"));

        let pinned = render_page(&data, &ViewState::from_preference(Some(Theme::Dark)));
        assert!(pinned.contains("<html lang=\"en\" class=\"dark\">"));
    }

    #[test]
    fn test_social_links_are_escaped() {
        let mut out = String::new();
        let links = SocialLinks {
            github: "https://github.com/a?x=1&y=2".to_string(),
            linkedin: "https://linkedin.com/in/a".to_string(),
            twitter: "https://twitter.com/a".to_string(),
        };
        write_contact(&mut out, &ContactInfo::default(), &links, &ContactForm::new()).unwrap();
        assert!(out.contains("href=\"https://github.com/a?x=1&amp;y=2\""));
        assert!(out.contains(">GitHub</a>"));
    }
}
