//! Static page table for the desirability survey.
//!
//! Pages are numbered from 1. Each page is tagged with what it asks for:
//! plain information, the identity form, a question group, or the
//! frustration rating block. The reverse index from group name to page is
//! built once when the catalog is constructed.

use std::collections::HashMap;

use super::error::WizardError;

/// Key under which the rating block is stored in the responses.
pub const FRUSTRATIONS_KEY: &str = "frustrations";

/// Question text attached to the rating block.
pub const FRUSTRATIONS_QUESTION: &str = "Rate your frustration with these struggles";

/// Struggles rated on the frustration page, in track order.
pub const FRUSTRATION_TITLES: [&str; 6] = [
    "No event buddies",
    "Stuck in a social rut",
    "Struggling with starting conversations",
    "Difficulty finding people with similar interests",
    "No plans on short notice",
    "Feeling isolated in a new place",
];

/// Selection cap for a multi-select group with `option_count` options.
///
/// This is a policy table rather than a formula.
pub fn max_selections(option_count: usize) -> usize {
    match option_count {
        n if n >= 6 => 4,
        5 => 3,
        4 => 2,
        _ => 2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Checkbox-style group capped by [`max_selections`]
    Multi,
    /// Radio-style group, exactly one choice
    Single,
}

/// How options in a group are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStyle {
    Plain,
    /// Options carry an add/check glyph that follows the checked state
    Icon,
}

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub value: &'static str,
    /// Display label; the value stands in when absent
    pub label: Option<&'static str>,
}

impl OptionSpec {
    pub const fn labeled(value: &'static str, label: &'static str) -> Self {
        Self {
            value,
            label: Some(label),
        }
    }

    pub const fn bare(value: &'static str) -> Self {
        Self { value, label: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionGroupConfig {
    pub name: &'static str,
    pub title: &'static str,
    pub options: Vec<OptionSpec>,
    pub mode: SelectionMode,
    pub style: OptionStyle,
}

impl QuestionGroupConfig {
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Effective cap: single-select groups always allow exactly one.
    pub fn max_selections(&self) -> usize {
        match self.mode {
            SelectionMode::Single => 1,
            SelectionMode::Multi => max_selections(self.option_count()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Info {
        title: &'static str,
        body: &'static [&'static str],
    },
    Identity,
    Question(QuestionGroupConfig),
    Rating,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    pub number: usize,
    pub kind: PageKind,
}

impl PageDescriptor {
    pub fn title(&self) -> &'static str {
        match &self.kind {
            PageKind::Info { title, .. } => *title,
            PageKind::Identity => "Tell us about yourself",
            PageKind::Question(group) => group.title,
            PageKind::Rating => FRUSTRATIONS_QUESTION,
        }
    }

    pub fn group(&self) -> Option<&QuestionGroupConfig> {
        match &self.kind {
            PageKind::Question(group) => Some(group),
            _ => None,
        }
    }
}

/// Ordered, immutable list of pages with a name index over question groups
#[derive(Debug, Clone)]
pub struct PageCatalog {
    pages: Vec<PageDescriptor>,
    group_pages: HashMap<&'static str, usize>,
}

impl PageCatalog {
    /// Build a catalog from pages given in order. Page numbers are assigned
    /// from position (first page is 1).
    pub fn from_kinds(kinds: Vec<PageKind>) -> Result<Self, WizardError> {
        if kinds.is_empty() {
            return Err(WizardError::EmptyCatalog);
        }

        let mut group_pages = HashMap::new();
        let mut pages = Vec::with_capacity(kinds.len());
        for (i, kind) in kinds.into_iter().enumerate() {
            let number = i + 1;
            if let PageKind::Question(group) = &kind {
                if group.name == FRUSTRATIONS_KEY {
                    return Err(WizardError::ReservedGroupName(group.name.to_string()));
                }
                if group_pages.insert(group.name, number).is_some() {
                    return Err(WizardError::DuplicateGroup(group.name.to_string()));
                }
            }
            pages.push(PageDescriptor { number, kind });
        }

        Ok(Self { pages, group_pages })
    }

    /// The 19-page desirability survey
    pub fn standard() -> Self {
        Self::from_kinds(standard_kinds())
            .expect("built-in survey pages must form a valid catalog")
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, number: usize) -> Option<&PageDescriptor> {
        number.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    pub fn contains(&self, number: usize) -> bool {
        (1..=self.pages.len()).contains(&number)
    }

    pub fn is_last(&self, number: usize) -> bool {
        number == self.pages.len()
    }

    /// Page number hosting the named group
    pub fn page_of_group(&self, name: &str) -> Option<usize> {
        self.group_pages.get(name).copied()
    }

    pub fn group_by_name(&self, name: &str) -> Option<&QuestionGroupConfig> {
        self.page_of_group(name)
            .and_then(|n| self.page(n))
            .and_then(PageDescriptor::group)
    }

    /// Question groups in page order
    pub fn groups(&self) -> impl Iterator<Item = &QuestionGroupConfig> {
        self.pages.iter().filter_map(PageDescriptor::group)
    }
}

impl Default for PageCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn multi(name: &'static str, title: &'static str, options: Vec<OptionSpec>) -> PageKind {
    PageKind::Question(QuestionGroupConfig {
        name,
        title,
        options,
        mode: SelectionMode::Multi,
        style: OptionStyle::Plain,
    })
}

fn standard_kinds() -> Vec<PageKind> {
    vec![
        PageKind::Info {
            title: "Welcome",
            body: &[
                "Thanks for stopping by!",
                "This short survey helps us understand how people meet new friends",
                "and plan outings. It takes about five minutes.",
            ],
        },
        PageKind::Info {
            title: "Why we're asking",
            body: &[
                "We're building a way to find people who want to do the same things you do.",
                "Your answers shape what we build first.",
            ],
        },
        PageKind::Info {
            title: "How it works",
            body: &[
                "Most questions let you pick a few answers. The counter shows how many",
                "you've chosen and turns red when you reach the limit.",
                "Every question is optional.",
            ],
        },
        PageKind::Identity,
        multi(
            "weekend",
            "What's Your Ideal Weekend?",
            vec![
                OptionSpec::labeled("explore", "Exploring new places"),
                OptionSpec::labeled("home", "Chilling at home"),
                OptionSpec::labeled("friends", "Hanging out with friends"),
                OptionSpec::labeled("new_activity", "Trying a new activity"),
                OptionSpec::labeled("events", "Going to events"),
            ],
        ),
        multi(
            "meeting",
            "How do you feel about meeting new people on app?",
            vec![
                OptionSpec::labeled("excited", "Excited, bring it on"),
                OptionSpec::labeled("curious", "Curious but cautious"),
                OptionSpec::labeled("nervous", "A little nervous"),
                OptionSpec::labeled("depends", "Depends on the activity"),
                OptionSpec::labeled("not_interested", "Not interested"),
            ],
        ),
        PageKind::Question(QuestionGroupConfig {
            name: "vibe",
            title: "Pick your vibe.",
            options: vec![
                OptionSpec::labeled("adventurous", "Adventurous"),
                OptionSpec::labeled("chill", "Chill"),
                OptionSpec::labeled("creative", "Creative"),
                OptionSpec::labeled("foodie", "Foodie"),
                OptionSpec::labeled("fitness", "Fitness"),
                OptionSpec::labeled("nightlife", "Nightlife"),
                OptionSpec::labeled("nerdy", "Nerdy"),
            ],
            mode: SelectionMode::Multi,
            style: OptionStyle::Icon,
        }),
        PageKind::Info {
            title: "You're doing great",
            body: &["A few more questions about what you've tried lately."],
        },
        PageKind::Question(QuestionGroupConfig {
            name: "new_things",
            title: "When was the last time you tried something new with someone?",
            options: vec![
                OptionSpec::labeled("this_week", "This week"),
                OptionSpec::labeled("this_month", "This month"),
                OptionSpec::labeled("cant_remember", "Can't remember"),
            ],
            mode: SelectionMode::Single,
            style: OptionStyle::Plain,
        }),
        PageKind::Rating,
        multi(
            "blockers",
            "What stopped you from meeting new people?",
            vec![
                OptionSpec::labeled("where_to_go", "Didn't know where to go"),
                OptionSpec::labeled("no_one", "No one to go with"),
                OptionSpec::labeled("anxiety", "Social anxiety"),
                OptionSpec::labeled("schedule", "Busy schedule"),
                OptionSpec::labeled("cost", "Cost"),
                OptionSpec::labeled("safety", "Safety concerns"),
            ],
        ),
        PageKind::Info {
            title: "Almost there",
            body: &["Last stretch: tell us what would make an app like this worth using."],
        },
        multi(
            "safe_fun",
            "Would you try a SAFE, fun way to...?",
            vec![
                OptionSpec::labeled("friends", "Make new friends"),
                OptionSpec::labeled("partners", "Find activity partners"),
                OptionSpec::labeled("city", "Explore your city"),
                OptionSpec::labeled("groups", "Join group events"),
            ],
        ),
        multi(
            "platform",
            "How likely are you to join a platform that helps you:",
            vec![
                OptionSpec::labeled("shared_interests", "Find people with shared interests"),
                OptionSpec::labeled("spontaneous", "Plan spontaneous outings"),
                OptionSpec::labeled("small_groups", "Join small group meetups"),
                OptionSpec::labeled("local_events", "Discover local events"),
                OptionSpec::labeled("regular_crew", "Build a regular crew"),
            ],
        ),
        multi(
            "challenges",
            "What are the biggest challenges you face when trying to meet new people or plan outings?",
            vec![
                OptionSpec::labeled("like_minded", "Finding like-minded people"),
                OptionSpec::labeled("schedules", "Coordinating schedules"),
                OptionSpec::labeled("awkward", "Feeling awkward at first"),
                OptionSpec::labeled("ideas", "Knowing what to do"),
                OptionSpec::labeled("trust", "Trusting strangers"),
            ],
        ),
        multi(
            "features",
            "What features would you find most useful in an app that connects you with like-minded people?",
            vec![
                OptionSpec::labeled("matching", "Interest-based matching"),
                OptionSpec::labeled("group_chat", "Group chats"),
                OptionSpec::labeled("event_discovery", "Event discovery"),
                OptionSpec::labeled("verified", "Verified profiles"),
                OptionSpec::labeled("suggestions", "Activity suggestions"),
                OptionSpec::labeled("calendar", "Calendar sync"),
                OptionSpec::bare("reviews"),
            ],
        ),
        multi(
            "safety",
            "What safety features would make you feel more comfortable meeting strangers through an app?",
            vec![
                OptionSpec::labeled("id_verification", "ID verification"),
                OptionSpec::labeled("public_spots", "Public meeting spots"),
                OptionSpec::labeled("share_trip", "Share plans with a friend"),
                OptionSpec::labeled("reporting", "In-app reporting"),
            ],
        ),
        multi(
            "scenarios",
            "Which of these scenarios would you most likely use the app for?",
            vec![
                OptionSpec::labeled("weekend_plans", "Weekend plans"),
                OptionSpec::labeled("new_hobby", "Trying a new hobby"),
                OptionSpec::labeled("new_city", "Moving to a new city"),
                OptionSpec::labeled("gym_buddy", "Finding a gym buddy"),
                OptionSpec::labeled("last_minute", "Last-minute plans"),
            ],
        ),
        PageKind::Info {
            title: "Ready to submit",
            body: &[
                "That's everything. Review your answers with Esc if you like,",
                "then submit when you're ready.",
            ],
        },
    ]
}
