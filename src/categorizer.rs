/// Extension based file categorization.
///
/// Every file name maps to exactly one [`Category`] through a static,
/// compiled-in extension table. Lookups are case-insensitive and anything the
/// table does not know falls back to [`Category::Others`].
///
/// # Examples
///
/// ```
/// use sortdir::categorizer::{Category, categorize};
///
/// assert_eq!(categorize("holiday.JPG"), Category::Images);
/// assert_eq!(categorize("report.pdf"), Category::Documents);
/// assert_eq!(categorize("notes"), Category::Others);
/// ```
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// A category folder that files are sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Image files (JPG, PNG, GIF, BMP)
    Images,
    /// Document files (PDF, DOCX, TXT, XLSX, PPTX)
    Documents,
    /// Video files (MP4, AVI, MOV, MKV)
    Videos,
    /// Everything the table does not know
    Others,
}

impl Category {
    /// Returns the folder name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortdir::categorizer::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Others.dir_name(), "Others");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Videos => "Videos",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Maps lowercase extensions (with their leading dot) to categories.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    extension_map: HashMap<&'static str, Category>,
}

impl CategoryTable {
    /// Creates the standard table.
    pub fn new() -> Self {
        let mut table = Self {
            extension_map: HashMap::new(),
        };
        table.populate_standard_mappings();
        table
    }

    fn populate_standard_mappings(&mut self) {
        for ext in [".jpg", ".jpeg", ".png", ".gif", ".bmp"] {
            self.extension_map.insert(ext, Category::Images);
        }
        for ext in [".pdf", ".docx", ".doc", ".txt", ".xlsx", ".pptx"] {
            self.extension_map.insert(ext, Category::Documents);
        }
        for ext in [".mp4", ".avi", ".mov", ".mkv"] {
            self.extension_map.insert(ext, Category::Videos);
        }
    }

    /// Looks up an extension such as `".png"`. The lookup is case-insensitive.
    pub fn lookup(&self, extension: &str) -> Option<Category> {
        self.extension_map
            .get(extension.to_lowercase().as_str())
            .copied()
    }

    /// Categorizes a file name, falling back to [`Category::Others`].
    pub fn categorize(&self, filename: &str) -> Category {
        self.lookup(&extension_of(filename))
            .unwrap_or(Category::Others)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new()
    }
}

static STANDARD_TABLE: LazyLock<CategoryTable> = LazyLock::new(CategoryTable::new);

/// Returns the lowercase extension of `filename` including its leading dot,
/// or an empty string when there is none.
///
/// A dot-file such as `.bashrc` has no extension, and only the part after the
/// last dot counts (`archive.tar.gz` yields `.gz`).
///
/// # Examples
///
/// ```
/// use sortdir::categorizer::extension_of;
///
/// assert_eq!(extension_of("Photo.JPEG"), ".jpeg");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of("README"), "");
/// ```
pub fn extension_of(filename: &str) -> String {
    match Path::new(filename).extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
        None => String::new(),
    }
}

/// Categorizes a file name using the standard compiled-in table.
pub fn categorize(filename: &str) -> Category {
    STANDARD_TABLE.categorize(filename)
}
