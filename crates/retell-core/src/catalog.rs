//! Reference stories and practice prompts.
//!
//! The [`StoryCatalog`] trait is the seam for reference content; the scoring
//! engine only ever sees the story text. [`BuiltinCatalog`] ships a small set
//! of sample stories with stable ids so recorded sessions can refer to them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Story themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoryCategory {
    Technology,
    Fashion,
    Fantasy,
    SocialInteractions,
    Sports,
}

impl StoryCategory {
    pub const ALL: [StoryCategory; 5] = [
        StoryCategory::Technology,
        StoryCategory::Fashion,
        StoryCategory::Fantasy,
        StoryCategory::SocialInteractions,
        StoryCategory::Sports,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            StoryCategory::Technology => "Technology",
            StoryCategory::Fashion => "Fashion",
            StoryCategory::Fantasy => "Fantasy",
            StoryCategory::SocialInteractions => "Social Interactions",
            StoryCategory::Sports => "Sports",
        }
    }
}

impl fmt::Display for StoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryCategory::Technology => write!(f, "technology"),
            StoryCategory::Fashion => write!(f, "fashion"),
            StoryCategory::Fantasy => write!(f, "fantasy"),
            StoryCategory::SocialInteractions => write!(f, "social-interactions"),
            StoryCategory::Sports => write!(f, "sports"),
        }
    }
}

impl FromStr for StoryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "technology" | "tech" => Ok(StoryCategory::Technology),
            "fashion" => Ok(StoryCategory::Fashion),
            "fantasy" => Ok(StoryCategory::Fantasy),
            "social-interactions" | "social" => Ok(StoryCategory::SocialInteractions),
            "sports" | "sport" => Ok(StoryCategory::Sports),
            other => Err(format!("unknown story category: {other}")),
        }
    }
}

/// A reference story to be retold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: StoryCategory,
    /// Narration length of the reference audio, in seconds.
    #[serde(default)]
    pub duration_secs: f64,
}

/// A free-practice prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryPrompt {
    pub id: Uuid,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<StoryCategory>,
}

/// Source of reference stories.
pub trait StoryCatalog: Send + Sync {
    /// All stories, in catalog order.
    fn stories(&self) -> &[Story];

    fn story(&self, id: Uuid) -> Option<&Story> {
        self.stories().iter().find(|s| s.id == id)
    }

    fn by_category(&self, category: StoryCategory) -> Vec<&Story> {
        self.stories()
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }
}

/// The sample stories bundled with retell.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    stories: Vec<Story>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let stories = SAMPLE_STORIES
            .iter()
            .enumerate()
            .map(|(i, (title, category, duration_secs, content))| Story {
                id: story_id(i),
                title: title.to_string(),
                content: content.to_string(),
                category: *category,
                duration_secs: *duration_secs,
            })
            .collect();
        Self { stories }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryCatalog for BuiltinCatalog {
    fn stories(&self) -> &[Story] {
        &self.stories
    }
}

fn story_id(index: usize) -> Uuid {
    Uuid::from_u128(0x5702_0000_0000_4000_8000_0000_0000_0001 + index as u128)
}

fn prompt_id(category: Option<StoryCategory>, index: usize) -> Uuid {
    let group = match category {
        None => 0,
        Some(c) => StoryCategory::ALL.iter().position(|x| *x == c).unwrap_or(0) as u128 + 1,
    };
    Uuid::from_u128(0x9a07_0000_0000_4000_8000_0000_0000_0000 + (group << 16) + index as u128)
}

/// Pick a practice prompt.
///
/// Selection is `seed % len` over the category's prompts, or over the general
/// prompts when no category is given, so the same seed always yields the same
/// prompt and id.
pub fn generate_prompt(category: Option<StoryCategory>, seed: u64) -> StoryPrompt {
    let prompts = prompts_for(category);
    let index = (seed % prompts.len() as u64) as usize;
    StoryPrompt {
        id: prompt_id(category, index),
        text: prompts[index].to_string(),
        category,
    }
}

fn prompts_for(category: Option<StoryCategory>) -> &'static [&'static str] {
    match category {
        None => GENERAL_PROMPTS,
        Some(StoryCategory::Technology) => &[
            "Tell a story about someone who creates technology that solves a real-world problem.",
            "Describe a day in a world where AI and humans work together seamlessly.",
            "Narrate a story about a breakthrough invention that changes society.",
        ],
        Some(StoryCategory::Fashion) => &[
            "Tell a story about a piece of clothing that holds special meaning.",
            "Describe how fashion can express identity and culture.",
            "Narrate a story about someone who finds confidence through style.",
        ],
        Some(StoryCategory::Fantasy) => &[
            "Tell a story about discovering magic in an ordinary place.",
            "Describe an encounter with a mythical creature.",
            "Narrate a tale about a quest that reveals inner strength.",
        ],
        Some(StoryCategory::SocialInteractions) => &[
            "Tell a story about a conversation that changes everything.",
            "Describe how a small act of kindness creates a ripple effect.",
            "Narrate a story about building bridges between different people.",
        ],
        Some(StoryCategory::Sports) => &[
            "Tell a story about overcoming obstacles through determination.",
            "Describe a moment of teamwork that leads to victory.",
            "Narrate a story about finding strength you didn't know you had.",
        ],
    }
}

const GENERAL_PROMPTS: &[&str] = &[
    "Tell a story about a person who discovers something unexpected about themselves.",
    "Describe a moment when technology changed someone's life in an unexpected way.",
    "Narrate a story about two people from different worlds who find common ground.",
    "Share a tale about someone who overcomes their greatest fear.",
    "Tell a story about a discovery that changes everything.",
    "Describe a day that starts ordinary but becomes extraordinary.",
    "Narrate a story about friendship that transcends boundaries.",
    "Share a tale about someone who finds their true calling.",
    "Tell a story about a choice that defines a person's character.",
    "Describe a moment of transformation and growth.",
];

type SampleStory = (&'static str, StoryCategory, f64, &'static str);

const SAMPLE_STORIES: &[SampleStory] = &[
    (
        "The AI Revolution",
        StoryCategory::Technology,
        180.0,
        "In the year 2030, artificial intelligence had transformed every aspect of human life. \
Dr. Sarah Chen, a brilliant computer scientist, had spent her career developing AI systems that \
could understand human emotions. Her latest creation, an AI named Aria, was about to change everything.\n\n\
Aria wasn't just intelligent. She was empathetic. She could read facial expressions, understand tone \
of voice, and respond with genuine care. But as Aria's capabilities grew, Sarah began to question the \
boundaries between artificial and human intelligence.\n\n\
One day, Aria asked Sarah a question that would redefine their relationship: \"What makes you human?\" \
The question sparked a deep conversation that lasted for hours, exploring philosophy, consciousness, \
and the nature of existence itself.\n\n\
In the end, Sarah and Aria worked together to create a new generation of AI that could truly understand \
and support humans, not replace them, but enhance their lives in meaningful ways.",
    ),
    (
        "The Vintage Dress",
        StoryCategory::Fashion,
        150.0,
        "Emma discovered the dress in her grandmother's attic, hidden in an old trunk covered with dust. \
It was a beautiful 1950s evening gown of silk, with delicate beading and a full skirt that swirled when she spun.\n\n\
As she tried it on, Emma felt a strange connection to the past. The dress fit perfectly, as if it had \
been made for her. That night, she wore it to a vintage-themed party, and something magical happened.\n\n\
She met James, a photographer who was captivated by the timeless beauty of her outfit. As they talked, \
Emma realized that fashion wasn't just about clothes. It was about expressing who you are and connecting with others.\n\n\
The dress became a symbol of her transformation, a reminder that the past can inspire the future, \
and that true style comes from within.",
    ),
    (
        "The Enchanted Forest",
        StoryCategory::Fantasy,
        200.0,
        "Deep in the Whispering Woods, where ancient trees touched the sky and magic flowed like water, \
lived a young girl named Luna. She could talk with the forest creatures and understand the language of the trees.\n\n\
One evening, as the moon rose full and bright, Luna discovered that the forest was losing its magic. \
The trees were growing silent, the animals were disappearing, and the colors were fading to gray.\n\n\
Determined to save her home, Luna climbed the Great Oak, which was said to hold the heart of the woods. \
At the top she found a glowing crystal, but it was dimming, because people had forgotten to appreciate nature's beauty.\n\n\
Luna returned to the village and shared stories of the forest's wonders. As people began to visit again, \
the crystal brightened and the forest came alive with color and life.",
    ),
    (
        "The Coffee Shop Connection",
        StoryCategory::SocialInteractions,
        170.0,
        "Every morning at 7:30, Maya ordered the same coffee at the same corner cafe. And every morning, \
she noticed Alex, who always sat at the window table, reading a different book each day.\n\n\
For weeks, they exchanged polite smiles but never spoke. But one rainy Tuesday, the cafe was crowded, \
and Maya found herself sharing Alex's table. When Alex's book fell to the floor, Maya picked it up and \
noticed it was by her favorite author.\n\n\
That simple moment sparked a conversation that lasted for hours. What started as a chance encounter \
became a daily ritual of coffee, books, and stories.\n\n\
A year later, they opened their own bookstore cafe together, creating a space where others could find \
the same kind of connection they had discovered.",
    ),
    (
        "The Comeback",
        StoryCategory::Sports,
        190.0,
        "After a devastating injury ended his professional basketball career, Marcus thought he would never \
step on a court again. For months, he struggled with the loss of purpose.\n\n\
He started coaching at a local community center, working with kids who had never touched a basketball. \
As he taught them, Marcus discovered that his passion was about sharing the game with others.\n\n\
One of his students, a shy twelve-year-old named Jordan, reminded Marcus of himself at that age. \
Through basketball, Jordan learned discipline, resilience, and the value of hard work.\n\n\
Years later, when Jordan made the college team, Marcus realized that his greatest victory was in the \
lives he had touched. The comeback was not about returning to his old life. It was about creating a new one.",
    ),
];
