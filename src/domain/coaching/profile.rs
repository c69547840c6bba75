//! Practice target profiles.
//!
//! Profiles are immutable sample data describing the person the user is
//! practicing a conversation with. They are never persisted.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProfileId;

/// A practice target's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub nickname: String,
    pub age: u32,
    pub tags: Vec<String>,
    pub bio: String,
    pub recent_moments: String,
}

impl Profile {
    /// Tags joined for prompt and display use.
    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }
}

/// Read-only collection of profiles a session can pick from.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl ProfileCatalog {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// The built-in demo profiles.
    pub fn samples() -> Self {
        SAMPLE_CATALOG.clone()
    }

    pub fn all(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn find(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }
}

static SAMPLE_CATALOG: Lazy<ProfileCatalog> = Lazy::new(|| {
    ProfileCatalog::new(vec![
        sample(
            1,
            "音乐爱好者小张",
            24,
            &["吉他", "民谣", "旅行", "摄影", "咖啡"],
            "用音乐记录生活，用脚步丈量世界",
            "刚刚在丽江古城听到一首超棒的民谣！准备学起来🎵",
        ),
        sample(
            2,
            "读书人小王",
            26,
            &["阅读", "写作", "哲学", "历史", "茶道"],
            "在书海中寻找智慧，在文字间表达思考",
            "最近在读《人类简史》，对认知革命有了新的理解📚",
        ),
        sample(
            3,
            "运动达人小李",
            23,
            &["篮球", "健身", "跑步", "营养", "健康"],
            "生命在于运动，健康源于坚持",
            "今天完成了半马训练，刷新了个人记录！🏃‍♂️",
        ),
        sample(
            4,
            "美食家小赵",
            25,
            &["烹饪", "烘焙", "探店", "咖啡", "美食摄影"],
            "吃货的人生不需要解释，唯美食与爱不可辜负",
            "发现了一家超赞的意大利餐厅，提拉米苏绝了！🍰",
        ),
    ])
});

fn sample(
    id: u32,
    nickname: &str,
    age: u32,
    tags: &[&str],
    bio: &str,
    recent_moments: &str,
) -> Profile {
    Profile {
        id: ProfileId::new(id),
        nickname: nickname.to_string(),
        age,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        bio: bio.to_string(),
        recent_moments: recent_moments.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_has_four_profiles() {
        let catalog = ProfileCatalog::samples();
        assert_eq!(catalog.all().len(), 4);
    }

    #[test]
    fn find_returns_matching_profile() {
        let catalog = ProfileCatalog::samples();
        let profile = catalog.find(ProfileId::new(2)).unwrap();
        assert_eq!(profile.nickname, "读书人小王");
        assert_eq!(profile.age, 26);
    }

    #[test]
    fn find_unknown_id_returns_none() {
        let catalog = ProfileCatalog::samples();
        assert!(catalog.find(ProfileId::new(99)).is_none());
    }

    #[test]
    fn tags_joined_uses_comma_separator() {
        let catalog = ProfileCatalog::samples();
        let profile = catalog.find(ProfileId::new(1)).unwrap();
        assert_eq!(profile.tags_joined(), "吉他, 民谣, 旅行, 摄影, 咖啡");
    }
}
