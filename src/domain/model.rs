use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the page renders. Read-only for the lifetime of a page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub profile: Profile,
    pub about: About,
    pub projects: Vec<Project>,
    pub social_links: SocialLinks,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub profile_pic_url: String,
    pub resume_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub link: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
}

impl SocialLinks {
    /// (platform label, url) pairs in display order.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("GitHub", self.github.as_str()),
            ("LinkedIn", self.linkedin.as_str()),
            ("Twitter", self.twitter.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

impl Default for PortfolioData {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            about: About::default(),
            projects: default_projects(),
            social_links: SocialLinks::default(),
            contact: ContactInfo::default(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Thimira Niranjaya".to_string(),
            title: "Software Developer".to_string(),
            tagline: "Building beautiful and functional web applications.".to_string(),
            profile_pic_url: "https://placehold.co/400x400/94A3B8/FFFFFF?text=Thimira".to_string(),
            resume_url: "#".to_string(),
        }
    }
}

impl Default for About {
    fn default() -> Self {
        Self {
            bio: "Hello! I'm a passionate software developer with a knack for creating clean and \
                  efficient code. I specialize in front-end development and love to build \
                  user-friendly interfaces. My journey in tech started with a curiosity for how \
                  things work, and it has evolved into a career I love. In my free time, I enjoy \
                  reading, hiking, and exploring new technologies."
                .to_string(),
            skills: [
                "React",
                "JavaScript",
                "HTML",
                "CSS",
                "Tailwind CSS",
                "Node.js",
                "Express.js",
                "MongoDB",
                "Figma",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            github: "https://github.com/your-username".to_string(),
            linkedin: "https://linkedin.com/in/your-username".to_string(),
            twitter: "https://twitter.com/your-username".to_string(),
        }
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: "jane.doe@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
        }
    }
}

fn default_projects() -> Vec<Project> {
    fn project(id: u32, title: &str, description: &str, slug: &str, tech: &[&str]) -> Project {
        Project {
            id,
            title: title.to_string(),
            description: description.to_string(),
            link: format!("https://github.com/your-username/{}", slug),
            tech_stack: tech.iter().map(|t| t.to_string()).collect(),
        }
    }

    vec![
        project(
            1,
            "Project Alpha",
            "A dynamic web application for managing tasks and tracking progress. Built with \
             React and a Node.js backend. Features include user authentication, real-time \
             updates, and a clean user interface.",
            "project-alpha",
            &["React", "Node.js", "MongoDB"],
        ),
        project(
            2,
            "Project Beta",
            "A collaborative note-taking application. Users can create, edit, and share notes \
             with others. The application uses a real-time database and is designed to be \
             highly scalable.",
            "project-beta",
            &["Vue.js", "Firebase", "CSS"],
        ),
        project(
            3,
            "Portfolio Website",
            "This very website! A responsive and modern portfolio template built to showcase \
             my projects and skills. Designed with a focus on simplicity and user experience.",
            "portfolio",
            &["React", "Tailwind CSS"],
        ),
    ]
}

/// An accepted contact-form submission, as handed to a notifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Message => "message",
        }
    }
}

/// Client-held form values; this is also the JSON body posted to the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormState {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// The name used in `?theme=` queries and `data-theme` attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
