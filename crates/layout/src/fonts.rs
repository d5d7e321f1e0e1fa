//! Font resolution for card text.
//!
//! `FontLibrary` answers "which face draws this `FontSpec`". Faces registered
//! from the site's own font files win over system fonts; when nothing matches,
//! a generic sans-serif face is used so a card is still produced.
//!
//! ## Platform Abstraction
//!
//! - **System fonts** (feature: `system-fonts`): fontdb discovers installed faces
//! - **Registered fonts**: files loaded through a `ResourceProvider`

use ogcard_style::{FontSpec, FontStyle, FontWeight};
use ogcard_traits::{
    FontDescriptor, FontError, FontProvider, FontQuery, InMemoryFontProvider, ResourceProvider,
    SharedFontData,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

/// Raw face bytes with the index of the face inside a collection file.
pub struct FontInstance {
    pub data: SharedFontData,
    pub face_index: u32,
}

impl std::fmt::Debug for FontInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontInstance")
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

impl FontInstance {
    pub fn new(data: SharedFontData, face_index: u32) -> Self {
        Self { data, face_index }
    }

    /// Creates a lightweight Face view over the font data.
    /// This is cheap (parsing header) and avoids self-referential struct issues.
    pub fn as_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.face_index)
    }
}

pub type FontData = Arc<FontInstance>;

/// A face at a concrete pixel size.
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub data: FontData,
    pub size_px: f32,
}

impl ResolvedFont {
    pub fn new(data: FontData, size_px: f32) -> Self {
        Self { data, size_px }
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FontCacheKey {
    families: Vec<String>,
    weight: u16,
    style: u8, // 0=Normal, 1=Italic, 2=Oblique
}

impl FontCacheKey {
    fn new(spec: &FontSpec) -> Self {
        Self {
            families: spec.families.iter().map(|f| f.to_lowercase()).collect(),
            weight: spec.weight.numeric_value(),
            style: style_to_u8(&spec.style),
        }
    }
}

fn style_to_u8(s: &FontStyle) -> u8 {
    match s {
        FontStyle::Normal => 0,
        FontStyle::Italic => 1,
        FontStyle::Oblique => 2,
    }
}

/// Families tried, in order, once the requested ones and the generic
/// sans-serif have failed.
#[cfg(feature = "system-fonts")]
const SANS_FALLBACKS: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Noto Sans CJK JP",
];

/// Shared, thread-safe font resolution for a run.
#[derive(Clone)]
pub struct FontLibrary {
    #[cfg(feature = "system-fonts")]
    db: Arc<RwLock<fontdb::Database>>,

    /// Faces registered from configured font files.
    registered: Arc<InMemoryFontProvider>,

    /// `(path, family)` pairs already registered. Held while a file loads so
    /// concurrent registrations of the same file wait for the first.
    registered_files: Arc<Mutex<HashSet<(String, String)>>>,

    cache: Arc<RwLock<HashMap<FontCacheKey, FontData>>>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("registered_faces", &self.registered.len())
            .finish()
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// An empty library: no system fonts, nothing registered.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "system-fonts")]
            db: Arc::new(RwLock::new(fontdb::Database::new())),
            registered: Arc::new(InMemoryFontProvider::new()),
            registered_files: Arc::new(Mutex::new(HashSet::new())),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// A library that also searches installed system fonts.
    #[cfg(feature = "system-fonts")]
    pub fn with_system_fonts() -> Self {
        let lib = Self::new();
        if let Ok(mut db) = lib.db.write() {
            db.load_system_fonts();
            log::debug!("Loaded {} system font faces", db.len());
        }
        lib
    }

    /// Registers the font file at `path` under `family`.
    ///
    /// Registering the same `(path, family)` pair again is a no-op, including
    /// when several renders race to register it.
    pub fn register_font_file(
        &self,
        resources: &dyn ResourceProvider,
        path: &str,
        family: &str,
    ) -> Result<(), FontError> {
        let key = (path.to_string(), family.to_string());
        let mut done = self.registered_files.lock().map_err(|_| FontError::LoadFailed {
            path: path.to_string(),
            message: "font registry lock poisoned".to_string(),
        })?;
        if done.contains(&key) {
            return Ok(());
        }

        let data = resources.load(path).map_err(|e| FontError::LoadFailed {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let (weight, style) = {
            let face = ttf_parser::Face::parse(&data, 0)
                .map_err(|e| FontError::ParseError(format!("{}: {}", path, e)))?;
            let style = match face.style() {
                ttf_parser::Style::Normal => FontStyle::Normal,
                ttf_parser::Style::Italic => FontStyle::Italic,
                ttf_parser::Style::Oblique => FontStyle::Oblique,
            };
            (FontWeight::from_numeric(face.weight().to_number()), style)
        };

        log::debug!(
            "Registering font file '{}' as family '{}' ({:?}, {:?})",
            path, family, weight, style
        );
        self.registered.add_font(
            FontDescriptor {
                family: family.to_string(),
                weight,
                style,
                source_path: Some(path.to_string()),
            },
            data,
        )?;
        done.insert(key);
        drop(done);

        // A spec naming this family may have been resolved to a fallback already.
        self.clear_cache();
        Ok(())
    }

    /// Families registered from font files.
    pub fn registered_families(&self) -> Vec<String> {
        self.registered.list_families()
    }

    /// Finds the face for `spec` and pairs it with the spec's pixel size.
    ///
    /// Resolution order:
    /// 1. Registered font files
    /// 2. fontdb database (requested families, then sans-serif)
    pub fn resolve(&self, spec: &FontSpec) -> Result<ResolvedFont, FontError> {
        let key = FontCacheKey::new(spec);
        if let Ok(cache) = self.cache.read()
            && let Some(data) = cache.get(&key)
        {
            return Ok(ResolvedFont::new(data.clone(), spec.size_px));
        }

        let data = self.resolve_uncached(spec)?;
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, data.clone());
        }
        Ok(ResolvedFont::new(data, spec.size_px))
    }

    fn resolve_uncached(&self, spec: &FontSpec) -> Result<FontData, FontError> {
        log::debug!("Resolving font: {}", spec);

        let query = FontQuery::from_spec(spec);
        if let Ok(bytes) = self.registered.load_font(&query) {
            log::debug!("  → Found in registered fonts");
            return Ok(Arc::new(FontInstance::new(bytes, 0)));
        }

        #[cfg(feature = "system-fonts")]
        {
            self.resolve_from_fontdb(spec)
        }
        #[cfg(not(feature = "system-fonts"))]
        {
            Err(not_found(spec))
        }
    }

    #[cfg(feature = "system-fonts")]
    fn resolve_from_fontdb(&self, spec: &FontSpec) -> Result<FontData, FontError> {
        let db = self.db.read().map_err(|_| FontError::LoadFailed {
            path: spec.primary_family().to_string(),
            message: "fontdb lock poisoned".to_string(),
        })?;
        let weight = fontdb::Weight(spec.weight.numeric_value());
        let style = map_style(&spec.style);

        let requested: Vec<fontdb::Family<'_>> =
            spec.families.iter().map(|f| map_family(f)).collect();
        let id = query_db(&db, &requested, weight, style)
            .or_else(|| {
                log::warn!(
                    "No face for '{}', falling back to sans-serif",
                    spec.families.join(", ")
                );
                query_db(&db, &[fontdb::Family::SansSerif], weight, style)
            })
            .or_else(|| {
                SANS_FALLBACKS
                    .iter()
                    .find_map(|&name| query_db(&db, &[fontdb::Family::Name(name)], weight, style))
            })
            .or_else(|| first_latin_face(&db))
            .ok_or_else(|| not_found(spec))?;

        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| FontError::LoadFailed {
                path: spec.primary_family().to_string(),
                message: "face data unavailable".to_string(),
            })?;
        if let Some(face) = db.face(id) {
            log::debug!("  → Matched {:?} ({})", face.families, face.post_script_name);
        }
        Ok(Arc::new(FontInstance::new(Arc::new(bytes), index)))
    }

    fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }
}

fn not_found(spec: &FontSpec) -> FontError {
    FontError::NotFound {
        family: spec.primary_family().to_string(),
        weight: spec.weight.clone(),
        style: spec.style.clone(),
    }
}

#[cfg(feature = "system-fonts")]
fn query_db(
    db: &fontdb::Database,
    families: &[fontdb::Family<'_>],
    weight: fontdb::Weight,
    style: fontdb::Style,
) -> Option<fontdb::ID> {
    db.query(&fontdb::Query {
        families,
        weight,
        stretch: fontdb::Stretch::Normal,
        style,
    })
}

#[cfg(feature = "system-fonts")]
fn map_family(name: &str) -> fontdb::Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "sans-serif" => fontdb::Family::SansSerif,
        "serif" => fontdb::Family::Serif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(name),
    }
}

#[cfg(feature = "system-fonts")]
fn map_style(s: &FontStyle) -> fontdb::Style {
    match s {
        FontStyle::Normal => fontdb::Style::Normal,
        FontStyle::Italic => fontdb::Style::Italic,
        FontStyle::Oblique => fontdb::Style::Oblique,
    }
}

/// Any installed face able to draw Latin text.
#[cfg(feature = "system-fonts")]
fn first_latin_face(db: &fontdb::Database) -> Option<fontdb::ID> {
    db.faces().map(|f| f.id).find(|id| {
        db.with_face_data(*id, |data, index| {
            ttf_parser::Face::parse(data, index)
                .map(|face| face.glyph_index('A').is_some())
                .unwrap_or(false)
        })
        .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ogcard_traits::InMemoryResourceProvider;

    #[test]
    fn test_font_cache_key_ignores_family_case() {
        let a = FontCacheKey::new(&"Bold 70pt Arial".parse().unwrap());
        let b = FontCacheKey::new(&"bold 70pt arial".parse().unwrap());
        let c = FontCacheKey::new(&"70pt Arial".parse().unwrap());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_register_missing_file_reports_path() {
        let library = FontLibrary::new();
        let resources = InMemoryResourceProvider::new();
        let err = library
            .register_font_file(&resources, "fonts/missing.ttf", "Brand")
            .unwrap_err();
        assert!(matches!(err, FontError::LoadFailed { ref path, .. } if path == "fonts/missing.ttf"));
        assert!(library.registered_families().is_empty());
    }

    #[test]
    fn test_register_rejects_non_font_data() {
        let library = FontLibrary::new();
        let resources = InMemoryResourceProvider::new();
        resources.add("fonts/broken.ttf", b"not a font".to_vec()).unwrap();
        let err = library
            .register_font_file(&resources, "fonts/broken.ttf", "Brand")
            .unwrap_err();
        assert!(matches!(err, FontError::ParseError(_)));
    }

    #[test]
    fn test_empty_library_without_fonts_is_not_found() {
        let library = FontLibrary::new();
        let spec: FontSpec = "30px Nonexistent".parse().unwrap();
        assert!(matches!(library.resolve(&spec), Err(FontError::NotFound { .. })));
    }

    #[cfg(feature = "system-fonts")]
    #[test]
    fn test_registered_file_wins_and_is_idempotent() {
        let Some(bytes) = crate::test_utils::system_font_bytes() else {
            eprintln!("skipping: no system sans-serif font found");
            return;
        };
        let resources = InMemoryResourceProvider::new();
        resources.add_shared("fonts/brand.ttf", bytes.clone()).unwrap();

        let library = FontLibrary::new();
        library.register_font_file(&resources, "fonts/brand.ttf", "Brand Sans").unwrap();
        library.register_font_file(&resources, "fonts/brand.ttf", "Brand Sans").unwrap();
        assert_eq!(library.registered_families(), vec!["Brand Sans".to_string()]);
        assert_eq!(library.registered.len(), 1);

        let resolved = library.resolve(&"Bold 40px 'Brand Sans'".parse().unwrap()).unwrap();
        assert!(Arc::ptr_eq(&resolved.data.data, &bytes));
        assert_eq!(resolved.size_px, 40.0);
    }

    #[cfg(feature = "system-fonts")]
    #[test]
    fn test_concurrent_registration_loads_once() {
        let Some(bytes) = crate::test_utils::system_font_bytes() else {
            eprintln!("skipping: no system sans-serif font found");
            return;
        };
        let resources = Arc::new(InMemoryResourceProvider::new());
        resources.add_shared("fonts/brand.ttf", bytes).unwrap();
        let library = FontLibrary::new();

        std::thread::scope(|s| {
            for _ in 0..8 {
                let (library, resources) = (library.clone(), resources.clone());
                s.spawn(move || {
                    library
                        .register_font_file(resources.as_ref(), "fonts/brand.ttf", "Brand")
                        .unwrap();
                });
            }
        });
        assert_eq!(library.registered.len(), 1);
    }
}
