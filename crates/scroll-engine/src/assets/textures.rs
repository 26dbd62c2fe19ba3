use std::collections::HashMap;

use log::{error, info};

use crate::platform::TextureProvider;
use crate::renderer::traits::Texture;

/// Loaded textures keyed by file path. The first successful load of a path wins.
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: HashMap<String, Texture>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    /// Cached texture for `path`, without loading.
    pub fn get(&self, path: &str) -> Option<Texture> {
        self.textures.get(path).copied()
    }

    /// Cached texture for `path`, loading it on first use.
    /// A failed load is logged and returns `None`; nothing is cached for it.
    pub fn get_or_load(&mut self, path: &str, provider: &mut dyn TextureProvider) -> Option<Texture> {
        if let Some(texture) = self.textures.get(path) {
            return Some(*texture);
        }

        match provider.load_texture(path) {
            Ok(texture) => {
                info!("loaded texture {} ({}x{})", path, texture.width, texture.height);
                self.textures.insert(path.to_string(), texture);
                Some(texture)
            }
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.textures.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Destroy every cached texture through `provider` and empty the cache.
    pub fn unload(&mut self, provider: &mut dyn TextureProvider) {
        if self.textures.is_empty() {
            return;
        }
        let count = self.textures.len();
        for (_, texture) in self.textures.drain() {
            provider.destroy_texture(texture);
        }
        info!("unloaded {} textures", count);
    }
}
