//! The classic deck: a fixed list of insight sentences with matching images.
//!
//! Drawing picks one index uniformly at random and pairs the quote at that
//! index with the image for the same index. A custom deck can be loaded from
//! a JSON file:
//!
//! ```text
//! {
//!     "quotes": ["静待花开", "此刻即是礼物"],
//!     "images": ["https://example.org/a.png", "https://example.org/b.png"]
//! }
//! ```
//!
//! or with `"imageTemplate": "https://example.org/card-{index}.png"` in place
//! of an explicit image list.

use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::card::{Card, CardId, CardSource};
use crate::error::{CoreError, CoreResult};

/// The built-in deck (100 entries).
pub const CLASSIC_QUOTES: &[&str] = &[
    "顺境滋养，逆境成长",
    "凡是发生，必有利于我",
    "允许一切发生，生命自有安排",
    "你本来就很好，不需要成为别人",
    "慢一点，也是在前进",
    "每一次呼吸，都是重新开始的机会",
    "接纳此刻的自己，改变才会发生",
    "困难是化了妆的礼物",
    "你所寻找的，也在寻找你",
    "心若向阳，无畏悲伤",
    "静待花开，时间会给出答案",
    "照顾好自己，是爱别人的开始",
    "不完美，才是完整的你",
    "放下执念，心自会轻盈",
    "温柔地对待自己的疲惫",
    "你的感受值得被看见",
    "所有的相遇都是久别重逢",
    "今天的努力，是明天的底气",
    "答案就在你的内心深处",
    "允许自己休息，也是一种力量",
    "每一道伤口，都会长出光",
    "你比想象中更勇敢",
    "把注意力放在你能改变的事上",
    "生活不会辜负认真的人",
    "停下来，听听内心的声音",
    "当下即是最好的时刻",
    "失去的，终会以另一种方式归来",
    "信任过程，即使看不清终点",
    "你的存在本身就有意义",
    "用好奇代替评判",
    "柔软比坚硬更有力量",
    "每一个选择都在塑造未来的你",
    "感恩让平凡的日子发光",
    "走出舒适区，世界才会变大",
    "爱自己是终身浪漫的开始",
    "不必急着长大，也不必害怕变老",
    "在黑暗中，也要相信星光",
    "你已经做得足够好了",
    "放过别人，也是放过自己",
    "生命的意义在于体验本身",
    "给情绪一点空间，它会自己流走",
    "真正的力量来自内心的平静",
    "今天也值得被好好对待",
    "与其担忧，不如行动",
    "每一片落叶，都在为春天让路",
    "你所经历的，正在成就你",
    "简单的生活，丰盈的内心",
    "学会说不，是对自己的尊重",
    "失败只是还没有成功",
    "听从直觉，它比你想的更聪明",
    "看见需要，而不是只看见问题",
    "世界很大，你的心可以更大",
    "勇敢不是不害怕，而是害怕也继续",
    "陪伴是最长情的告白",
    "你可以同时是脆弱的和强大的",
    "有些路只能一个人走，但你并不孤单",
    "把今天过好，就是对未来最好的准备",
    "关系里最珍贵的是真诚",
    "给自己一个拥抱吧",
    "改变从一个小小的决定开始",
    "你的节奏，就是最好的节奏",
    "所有的等待都有它的意义",
    "转个念，风景就不同了",
    "宽恕是给自己的一份礼物",
    "每个人都在自己的时区里",
    "心安之处，便是归处",
    "看见自己的光，也看见别人的光",
    "遗憾也是生命的一部分",
    "你值得被温柔以待",
    "沉默之中，也藏着力量",
    "好好吃饭，好好睡觉，好好爱",
    "没有白走的路，每一步都算数",
    "让过去成为过去",
    "梦想不怕晚，只怕停",
    "接受无常，才能拥抱当下",
    "你的界限值得被守护",
    "一颗平常心，胜过千般计较",
    "每一次跌倒，都让你更了解自己",
    "内心丰盛，处处皆是风景",
    "珍惜眼前人，珍惜此刻情",
    "把烦恼交给时间",
    "爱是流动的，给出去也会流回来",
    "你不需要一次解决所有问题",
    "保持热爱，奔赴山海",
    "身体是心灵的家，请好好照顾它",
    "所谓成长，就是学会与自己和解",
    "希望是黑夜里最亮的灯",
    "慢慢来，比较快",
    "你的故事还在书写中",
    "真诚地活，坦荡地爱",
    "每一天都是新的一页",
    "聆听，是最好的理解",
    "你拥有的，比你以为的更多",
    "让心回到呼吸上",
    "不被定义，才能无限可能",
    "做自己的光，不必照亮所有人",
    "相信美好，美好就会发生",
    "此刻的你，正是最好的你",
    "一切都是最好的安排",
    "带着觉察，走向未知",
];

/// Default image template: a seeded 600x800 (3:4) illustration per index.
pub const DEFAULT_IMAGE_TEMPLATE: &str = "https://picsum.photos/seed/oh-card-{index}/600/800";

/// How a deck maps an index to an illustration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSet {
    /// A URL template in which `{index}` is replaced by the card index.
    Template(String),
    /// Explicit image URLs, reused cyclically when shorter than the quote list.
    Urls(Vec<String>),
}

impl Default for ImageSet {
    fn default() -> Self {
        Self::Template(DEFAULT_IMAGE_TEMPLATE.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckFile {
    quotes: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
    image_template: Option<String>,
}

/// A non-empty, ordered deck of quotes and their images.
#[derive(Debug, Clone)]
pub struct Deck {
    quotes: Vec<String>,
    images: ImageSet,
}

impl Deck {
    /// Build a deck. Fails with [`CoreError::EmptyDeck`] when no quote is
    /// non-blank.
    pub fn new(quotes: Vec<String>, images: ImageSet) -> CoreResult<Self> {
        let quotes: Vec<String> = quotes
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        if quotes.is_empty() {
            return Err(CoreError::EmptyDeck);
        }

        let images = match images {
            ImageSet::Urls(urls) if urls.is_empty() => ImageSet::default(),
            other => other,
        };

        Ok(Self { quotes, images })
    }

    /// The built-in deck.
    pub fn classic() -> Self {
        Self {
            quotes: CLASSIC_QUOTES.iter().map(|s| (*s).to_string()).collect(),
            images: ImageSet::default(),
        }
    }

    /// Parse a deck from its JSON representation.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let file: DeckFile = serde_json::from_str(json)?;
        let images = match file.image_template {
            Some(template) => ImageSet::Template(template),
            None => ImageSet::Urls(file.images),
        };
        Self::new(file.quotes, images)
    }

    /// Load a deck from a JSON file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::DeckIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Number of cards in the deck.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Always false for a constructed deck; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// The image belonging to the card at `index`.
    pub fn image_for(&self, index: usize) -> String {
        match &self.images {
            ImageSet::Template(template) => template.replace("{index}", &index.to_string()),
            ImageSet::Urls(urls) => urls[index % urls.len()].clone(),
        }
    }

    /// Iterate over `(index, quote)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.quotes.iter().map(String::as_str).enumerate()
    }

    /// Draw a card uniformly at random. Never fails.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Card {
        let index = rng.random_range(0..self.quotes.len());
        debug!(index, "drew classic card");
        Card::new(
            CardId::fresh(&format!("classic-{index}")),
            self.quotes[index].clone(),
            self.image_for(index),
            CardSource::Classic,
        )
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::classic()
    }
}
