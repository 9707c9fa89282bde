// ABOUTME: Interfaces of the admin host the settings panel registers itself with
// ABOUTME: Menu pages, asset queue, meta boxes, settings groups and an in-process recorder

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// Custom fields of one content item: each key may hold several values
pub type PostMeta = BTreeMap<String, Vec<String>>;

/// Where the settings screen lives in the admin menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuPage {
    /// Entry under an existing top-level screen
    Submenu {
        parent_slug: String,
        page_title: String,
        menu_title: String,
        capability: String,
        menu_slug: String,
    },
    /// Entry under the host's own settings screen
    OptionsPage {
        page_title: String,
        menu_title: String,
        capability: String,
        menu_slug: String,
    },
}

impl MenuPage {
    pub fn menu_slug(&self) -> &str {
        match self {
            MenuPage::Submenu { menu_slug, .. } | MenuPage::OptionsPage { menu_slug, .. } => {
                menu_slug
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Script,
    Style,
}

/// A script or stylesheet queued for the current admin screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub kind: AssetKind,
    pub handle: String,
    pub src: String,
    pub deps: Vec<String>,
    pub version: String,
    pub in_footer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaBox {
    pub id: String,
    pub title: String,
    pub screen: String,
    pub context: String,
    pub priority: String,
}

/// Storefront readiness as reported by the storefront plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StorefrontStatus {
    pub is_setup: bool,
    pub has_products: bool,
}

/// The slice of the admin host the settings panel talks to
pub trait AdminHost: Send + Sync {
    /// `None` when the storefront plugin is not loaded
    fn storefront_status(&self) -> Option<StorefrontStatus>;

    fn add_menu_page(&self, page: MenuPage);

    fn enqueue(&self, asset: Asset);

    fn add_meta_box(&self, meta_box: MetaBox);

    fn register_setting(&self, group: &str, name: &str);

    /// Custom fields of the content item `post_id`, `None` when it does not exist
    fn post_meta(&self, post_id: u64) -> Option<PostMeta>;
}

/// Admin host that records every registration in memory.
///
/// Used by the server binary, which has no real admin shell to hand
/// registrations to, and by tests.
#[derive(Debug, Default)]
pub struct InProcessHost {
    storefront: Option<StorefrontStatus>,
    menu_pages: Mutex<Vec<MenuPage>>,
    assets: Mutex<Vec<Asset>>,
    meta_boxes: Mutex<Vec<MetaBox>>,
    settings: Mutex<Vec<(String, String)>>,
    posts: Mutex<HashMap<u64, PostMeta>>,
}

impl InProcessHost {
    pub fn new(storefront: Option<StorefrontStatus>) -> Self {
        Self {
            storefront,
            ..Self::default()
        }
    }

    /// Make `meta` the custom fields of content item `post_id`
    pub fn insert_post_meta(&self, post_id: u64, meta: PostMeta) {
        lock(&self.posts).insert(post_id, meta);
    }

    pub fn menu_pages(&self) -> Vec<MenuPage> {
        lock(&self.menu_pages).clone()
    }

    pub fn assets(&self) -> Vec<Asset> {
        lock(&self.assets).clone()
    }

    pub fn meta_boxes(&self) -> Vec<MetaBox> {
        lock(&self.meta_boxes).clone()
    }

    /// Registered `(group, name)` pairs in registration order
    pub fn registered_settings(&self) -> Vec<(String, String)> {
        lock(&self.settings).clone()
    }
}

impl AdminHost for InProcessHost {
    fn storefront_status(&self) -> Option<StorefrontStatus> {
        self.storefront
    }

    fn add_menu_page(&self, page: MenuPage) {
        lock(&self.menu_pages).push(page);
    }

    fn enqueue(&self, asset: Asset) {
        let mut assets = lock(&self.assets);
        // Handles are unique within a request
        if !assets.iter().any(|a| a.handle == asset.handle) {
            assets.push(asset);
        }
    }

    fn add_meta_box(&self, meta_box: MetaBox) {
        lock(&self.meta_boxes).push(meta_box);
    }

    fn register_setting(&self, group: &str, name: &str) {
        lock(&self.settings).push((group.to_string(), name.to_string()));
    }

    fn post_meta(&self, post_id: u64) -> Option<PostMeta> {
        lock(&self.posts).get(&post_id).cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
