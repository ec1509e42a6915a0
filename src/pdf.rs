use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    io::BufWriter,
    mem,
    path::Path,
};
use time::OffsetDateTime;
use unicode_normalization::UnicodeNormalization as _;

use crate::error::ContextError;

/// Page attributes that a page inherits from its ancestors in the page tree when it doesn't define them.
const INHERITABLE_PAGE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on the depth of the page tree walked when resolving inherited attributes.
const MAXIMUM_PAGE_TREE_DEPTH: usize = 32;

/// The size of a page expressed in points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// ISO A4, 210 x 297 millimeters.
    pub const A4: PageSize = PageSize {
        width: 210.0 * POINTS_PER_MILLIMETER,
        height: 297.0 * POINTS_PER_MILLIMETER,
    };
    /// US Letter, 8.5 x 11 inches.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

const POINTS_PER_MILLIMETER: f32 = 72.0 / 25.4;

/// One of the standard 14 Type1 fonts that every PDF reader provides, hence they never need to be embedded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// The PostScript name of the font as expected by the `BaseFont` entry.
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn font_dictionary(self) -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.base_font(),
            "Encoding" => "WinAnsiEncoding",
        }
    }
}

/// How the content drawn through a `DrawingSurface` is combined with the content already on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendMode {
    /// The page content is replaced.
    Overwrite,
    /// The new content is drawn after the existing one, which is isolated in its own graphics state.
    Append,
}

/// A raster image decoded and ready to be inserted into a PDF document as an image `XObject`.
#[derive(Debug, Clone)]
pub struct ImageXObject {
    /// Width of the image in pixels, which is also the width in points at which it is drawn.
    pub width: u32,
    /// Height of the image in pixels.
    pub height: u32,
    /// 8 bits per component RGB samples.
    pub rgb_data: Vec<u8>,
    /// 8 bits alpha samples, inserted as a soft mask when present.
    pub alpha_data: Option<Vec<u8>>,
}

impl ImageXObject {
    /// Decode an encoded image (PNG or JPEG) into its samples.
    pub fn from_bytes(image_bytes: &[u8]) -> Result<Self, ContextError> {
        let image = image::load_from_memory(image_bytes)
            .map_err(|error| ContextError::with_error("Unable to decode the image", &error))?;

        let alpha_data = image.color().has_alpha().then(|| {
            image
                .to_rgba8()
                .pixels()
                .map(|pixel| pixel.0[3])
                .collect::<Vec<u8>>()
        });
        let rgb_image = image.to_rgb8();

        Ok(ImageXObject {
            width: rgb_image.width(),
            height: rgb_image.height(),
            rgb_data: rgb_image.into_raw(),
            alpha_data,
        })
    }

    /// Inserts the image (and its soft mask, if any) into the document and returns the reference to the image stream.
    fn insert_into_document(&self, document: &mut lopdf::Document) -> ObjectId {
        let soft_mask_id = self.alpha_data.as_ref().map(|alpha_data| {
            document.add_object(Stream::new(
                self.image_dictionary("DeviceGray"),
                alpha_data.clone(),
            ))
        });

        let mut image_dictionary = self.image_dictionary("DeviceRGB");
        if let Some(soft_mask_id) = soft_mask_id {
            image_dictionary.set("SMask", soft_mask_id);
        }

        document.add_object(Stream::new(image_dictionary, self.rgb_data.clone()))
    }

    fn image_dictionary(&self, color_space: &str) -> Dictionary {
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8,
        }
    }
}

/// This struct represents a PDF document on a high-level. It is an interface to the underlying
/// `lopdf::Document` which keeps track of the root of the page tree and of the standard fonts
/// already inserted, so that they are shared by all the pages.
pub struct PdfDocument {
    /// The underlying PDF document: this is a low-level interface and shouldn't be directly interacted with
    /// unless strictly necessary, anyway this is why it is exposed to the user.
    pub inner_document: lopdf::Document,
    /// The root node of the page tree, new pages are appended to its kids.
    pages_id: ObjectId,
    /// The font dictionaries inserted so far.
    fonts: BTreeMap<StandardFont, ObjectId>,
}

impl PdfDocument {
    /// Create a new empty `PdfDocument` (version 1.5 of the PDF specification) whose `ID` is the given identifier.
    pub fn new(identifier: &str) -> Self {
        let mut inner_document = lopdf::Document::with_version("1.5");

        let pages_id = inner_document.new_object_id();
        inner_document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );
        let catalog_id = inner_document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });

        let timestamp = to_pdf_timestamp_format(&OffsetDateTime::now_utc());
        let document_info_id = inner_document.add_object(dictionary! {
            "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
            "CreationDate" => Object::string_literal(timestamp.clone()),
            "ModDate" => Object::string_literal(timestamp),
        });

        inner_document.trailer.set("Root", catalog_id);
        inner_document.trailer.set("Info", document_info_id);
        inner_document.trailer.set(
            "ID",
            vec![
                Object::String(identifier.as_bytes().to_vec(), StringFormat::Literal),
                Object::String(identifier.as_bytes().to_vec(), StringFormat::Literal),
            ],
        );

        PdfDocument {
            inner_document,
            pages_id,
            fonts: BTreeMap::new(),
        }
    }

    /// Load an existing PDF document from the given path.
    pub fn load(path: &Path) -> Result<Self, ContextError> {
        let inner_document = lopdf::Document::load(path).map_err(|error| {
            ContextError::with_path("Unable to load the PDF document", path, &error)
        })?;
        Self::from_inner_document(inner_document)
    }

    /// Load an existing PDF document from its bytes.
    pub fn load_from_bytes(pdf_document_bytes: &[u8]) -> Result<Self, ContextError> {
        let inner_document = lopdf::Document::load_mem(pdf_document_bytes).map_err(|error| {
            ContextError::with_error("Unable to parse the PDF document", &error)
        })?;
        Self::from_inner_document(inner_document)
    }

    fn from_inner_document(inner_document: lopdf::Document) -> Result<Self, ContextError> {
        let pages_id = inner_document
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .and_then(|catalog_id| inner_document.get_dictionary(catalog_id))
            .and_then(|catalog| catalog.get(b"Pages"))
            .and_then(Object::as_reference)
            .map_err(|error| {
                ContextError::with_error("Unable to find the page tree of the document", &error)
            })?;

        Ok(PdfDocument {
            inner_document,
            pages_id,
            fonts: BTreeMap::new(),
        })
    }

    /// Appends an empty page of the given size and returns its object ID, which is to be passed to `surface`.
    pub fn add_page(&mut self, page_size: PageSize) -> Result<ObjectId, ContextError> {
        let page_id = self.inner_document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_size.width.into(), page_size.height.into()],
            "Resources" => Dictionary::new(),
        });
        self.append_kids(vec![page_id])?;

        Ok(page_id)
    }

    /// The object IDs of the pages in reading order.
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.inner_document.get_pages().into_values().collect()
    }

    pub fn page_count(&self) -> usize {
        self.inner_document.get_pages().len()
    }

    /// Opens a drawing surface on the given page. The operations issued through it only reach
    /// the page once `DrawingSurface::finish` is called.
    pub fn surface(&mut self, page_id: ObjectId, append_mode: AppendMode) -> DrawingSurface<'_> {
        DrawingSurface {
            document: self,
            page_id,
            append_mode,
            operations: Vec::new(),
            fonts: BTreeMap::new(),
            images: Vec::new(),
        }
    }

    /// The decoded operations of the content streams of the given page, in drawing order.
    pub fn page_operations(&self, page_id: ObjectId) -> Result<Vec<Operation>, ContextError> {
        let page_content = self.inner_document.get_page_content(page_id).map_err(|error| {
            ContextError::with_error("Unable to read the content of the page", &error)
        })?;
        let content = Content::decode(&page_content).map_err(|error| {
            ContextError::with_error("Unable to decode the content of the page", &error)
        })?;

        Ok(content.operations)
    }

    /// Moves all the pages of `other` at the end of this document, keeping their order. The pages are
    /// detached from their original page tree, so the attributes they inherited from it are copied onto them.
    pub fn append_pages_from(&mut self, other: PdfDocument) -> Result<(), ContextError> {
        let mut source_document = other.inner_document;
        source_document.renumber_objects_with(self.inner_document.max_id + 1);

        let mut imported_pages = Vec::new();
        for page_id in source_document.get_pages().into_values() {
            let mut page = source_document
                .get_dictionary(page_id)
                .cloned()
                .map_err(|error| {
                    ContextError::with_error("Unable to read a page of the appended document", &error)
                })?;
            for attribute in INHERITABLE_PAGE_ATTRIBUTES {
                if !page.has(attribute) {
                    if let Some(value) = inherited_attribute(&source_document, page_id, attribute) {
                        page.set(attribute.to_vec(), value);
                    }
                }
            }
            page.set("Parent", self.pages_id);
            imported_pages.push((page_id, page));
        }

        let source_max_id = source_document.max_id;
        for (object_id, object) in source_document.objects {
            match object.type_name().unwrap_or("") {
                // The page tree and the catalog of the appended document are replaced by ours
                "Catalog" | "Pages" | "Page" => {}
                _ => {
                    self.inner_document.objects.insert(object_id, object);
                }
            }
        }

        let page_ids = imported_pages
            .iter()
            .map(|(page_id, _)| *page_id)
            .collect::<Vec<_>>();
        for (page_id, page) in imported_pages {
            self.inner_document
                .objects
                .insert(page_id, Object::Dictionary(page));
        }
        self.inner_document.max_id = self.inner_document.max_id.max(source_max_id);

        self.append_kids(page_ids)
    }

    /// Optimize the PDF document (only superficially).
    pub fn optimize(&mut self) {
        self.inner_document.prune_objects();
        self.inner_document.compress();
    }

    /// Save the `PdfDocument` to bytes in order for it to be written to a file or further processed.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, ContextError> {
        self.optimize();

        let mut pdf_document_bytes = Vec::new();
        let mut writer = BufWriter::new(&mut pdf_document_bytes);
        self.inner_document.save_to(&mut writer).map_err(|error| {
            ContextError::with_error("Error while saving the PDF document to bytes", &error)
        })?;
        mem::drop(writer);

        Ok(pdf_document_bytes)
    }

    /// Save the `PdfDocument` to the given path, overwriting any existing file.
    pub fn save(&mut self, path: &Path) -> Result<(), ContextError> {
        let pdf_document_bytes = self.save_to_bytes()?;
        std::fs::write(path, pdf_document_bytes)
            .map_err(|error| ContextError::with_path("Unable to write the PDF document", path, &error))
    }

    /// Pushes the given pages at the end of the kids of the root of the page tree and updates its count.
    fn append_kids(&mut self, page_ids: Vec<ObjectId>) -> Result<(), ContextError> {
        let appended_pages = page_ids.len() as i64;
        let page_tree = self
            .inner_document
            .get_object_mut(self.pages_id)
            .and_then(Object::as_dict_mut)
            .map_err(|error| ContextError::with_error("Unable to access the page tree", &error))?;

        let page_count = page_tree
            .get(b"Count")
            .and_then(Object::as_i64)
            .unwrap_or(0);
        if !page_tree.has(b"Kids") {
            page_tree.set("Kids", Vec::<Object>::new());
        }
        page_tree
            .get_mut(b"Kids")
            .and_then(Object::as_array_mut)
            .map_err(|error| ContextError::with_error("Invalid kids in the page tree", &error))?
            .extend(page_ids.into_iter().map(Object::Reference));
        page_tree.set("Count", page_count + appended_pages);

        Ok(())
    }

    /// Retrieve (inserting it on first use) the font dictionary of the given standard font.
    fn font_id(&mut self, font: StandardFont) -> ObjectId {
        if let Some(font_id) = self.fonts.get(&font) {
            return *font_id;
        }
        let font_id = self.inner_document.add_object(font.font_dictionary());
        self.fonts.insert(font, font_id);

        font_id
    }

    /// The resource dictionary in effect for the page, with indirect references resolved.
    fn page_resources(&self, page_id: ObjectId) -> Result<Dictionary, ContextError> {
        match inherited_attribute(&self.inner_document, page_id, b"Resources") {
            Some(resources) => resolve_dictionary(&self.inner_document, &resources),
            None => Ok(Dictionary::new()),
        }
    }

    /// Finds the first name `<prefix><n>` which is neither used in the given resource category of the page
    /// nor already reserved by the caller.
    fn available_resource_name(
        &self,
        page_id: ObjectId,
        category: &[u8],
        prefix: &str,
        reserved: &[String],
    ) -> String {
        let used_names = self
            .page_resources(page_id)
            .ok()
            .and_then(|resources| {
                let category = resources.get(category).ok()?;
                resolve_dictionary(&self.inner_document, category).ok()
            })
            .map(|dictionary| {
                dictionary
                    .iter()
                    .map(|(name, _)| String::from_utf8_lossy(name).into_owned())
                    .collect::<BTreeSet<_>>()
            })
            .unwrap_or_default();

        (1..)
            .map(|index| format!("{prefix}{index}"))
            .find(|name| !used_names.contains(name) && !reserved.contains(name))
            .unwrap_or_else(|| prefix.to_string())
    }

    /// Makes the fonts and images drawn on the page reachable from its own resource dictionary.
    fn register_page_resources(
        &mut self,
        page_id: ObjectId,
        fonts: &BTreeMap<StandardFont, String>,
        images: &[(String, ObjectId)],
    ) -> Result<(), ContextError> {
        let font_entries = fonts
            .iter()
            .map(|(font, name)| (name.clone(), self.font_id(*font)))
            .collect::<Vec<_>>();

        let mut resources = self.page_resources(page_id)?;
        for (category, entries) in [("Font", font_entries.as_slice()), ("XObject", images)] {
            if entries.is_empty() {
                continue;
            }
            let mut category_dictionary = match resources.get(category.as_bytes()) {
                Ok(object) => resolve_dictionary(&self.inner_document, object)?,
                Err(_) => Dictionary::new(),
            };
            for (name, object_id) in entries {
                category_dictionary.set(name.as_bytes().to_vec(), *object_id);
            }
            resources.set(category, category_dictionary);
        }

        self.page_dictionary_mut(page_id)?.set("Resources", resources);

        Ok(())
    }

    fn page_dictionary_mut(&mut self, page_id: ObjectId) -> Result<&mut Dictionary, ContextError> {
        self.inner_document
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|error| {
                ContextError::with_error(format!("Failed to find the page {:?}", page_id), &error)
            })
    }
}

/// A scoped context for issuing drawing operations on one page. It borrows the document mutably,
/// so only one surface can be open at a time; the operations are encoded into a content stream
/// and attached to the page by `finish`, while dropping the surface discards them.
pub struct DrawingSurface<'a> {
    document: &'a mut PdfDocument,
    page_id: ObjectId,
    append_mode: AppendMode,
    operations: Vec<Operation>,
    /// The fonts used so far together with their resource name on this page.
    fonts: BTreeMap<StandardFont, String>,
    /// The images drawn so far together with their resource name on this page.
    images: Vec<(String, ObjectId)>,
}

impl DrawingSurface<'_> {
    /// Begin a text object, the text position is reset to the origin of the page.
    pub fn begin_text(&mut self) {
        self.operations.push(Operation::new("BT", vec![]));
    }

    pub fn end_text(&mut self) {
        self.operations.push(Operation::new("ET", vec![]));
    }

    pub fn set_font(&mut self, font: StandardFont, font_size: f32) {
        let resource_name = self.font_resource_name(font);
        self.operations.push(Operation::new(
            "Tf",
            vec![Object::Name(resource_name.into_bytes()), font_size.into()],
        ));
    }

    /// Sets the distance between the baselines of two consecutive lines, used by `new_line`.
    pub fn set_leading(&mut self, leading: f32) {
        self.operations
            .push(Operation::new("TL", vec![leading.into()]));
    }

    /// Moves to the start of the next line, offset from the start of the current one.
    pub fn new_line_at_offset(&mut self, x: f32, y: f32) {
        self.operations
            .push(Operation::new("Td", vec![x.into(), y.into()]));
    }

    /// Moves to the start of the next line, according to the leading.
    pub fn new_line(&mut self) {
        self.operations.push(Operation::new("T*", vec![]));
    }

    pub fn show_text(&mut self, text: &str) {
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
    }

    pub fn set_stroking_color(&mut self, color: [f32; 3]) {
        self.operations.push(Operation::new(
            "RG",
            color.into_iter().map(Object::Real).collect(),
        ));
    }

    /// Appends a rectangle to the current path, `(x, y)` being its lower-left corner.
    pub fn add_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.operations.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), height.into()],
        ));
    }

    pub fn stroke(&mut self) {
        self.operations.push(Operation::new("S", vec![]));
    }

    /// Inserts the image into the document and draws it at its own size with its lower-left corner at `(x, y)`.
    pub fn draw_image(&mut self, image: &ImageXObject, x: f32, y: f32) {
        let image_id = image.insert_into_document(&mut self.document.inner_document);
        let reserved = self
            .images
            .iter()
            .map(|(name, _)| name.clone())
            .collect::<Vec<_>>();
        let resource_name =
            self.document
                .available_resource_name(self.page_id, b"XObject", "Im", &reserved);

        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (image.width as f32).into(),
                    0.into(),
                    0.into(),
                    (image.height as f32).into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(resource_name.clone().into_bytes())]),
            Operation::new("Q", vec![]),
        ]);
        self.images.push((resource_name, image_id));
    }

    /// Encodes the operations into a content stream and attaches it to the page.
    pub fn finish(self) -> Result<(), ContextError> {
        let DrawingSurface {
            document,
            page_id,
            append_mode,
            mut operations,
            fonts,
            images,
        } = self;

        document.register_page_resources(page_id, &fonts, &images)?;

        let existing_contents = document
            .page_dictionary_mut(page_id)?
            .get(b"Contents")
            .ok()
            .cloned();
        let mut contents = Vec::new();
        let mut content = Vec::new();
        if let (AppendMode::Append, Some(existing_contents)) = (append_mode, existing_contents) {
            // Isolate the existing content so that the appended one starts from the default graphics state
            let save_state_id = document
                .inner_document
                .add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
            contents.push(Object::Reference(save_state_id));
            match existing_contents {
                Object::Array(existing_streams) => contents.extend(existing_streams),
                Object::Reference(contents_id) => {
                    // The reference is either a single stream or an indirect array of streams
                    match document.inner_document.get_object(contents_id) {
                        Ok(Object::Array(existing_streams)) => {
                            contents.extend(existing_streams.iter().cloned())
                        }
                        _ => contents.push(Object::Reference(contents_id)),
                    }
                }
                existing_stream => contents.push(existing_stream),
            }
            operations.insert(0, Operation::new("Q", vec![]));
            // The existing content may not end with a delimiter
            content.push(b'\n');
        }

        content.extend(Content { operations }.encode().map_err(|error| {
            ContextError::with_error("Unable to encode the content of the page", &error)
        })?);
        let content_id = document
            .inner_document
            .add_object(Stream::new(Dictionary::new(), content));
        contents.push(Object::Reference(content_id));

        let contents = if contents.len() == 1 {
            contents.remove(0)
        } else {
            Object::Array(contents)
        };
        document
            .page_dictionary_mut(page_id)?
            .set("Contents", contents);

        Ok(())
    }

    fn font_resource_name(&mut self, font: StandardFont) -> String {
        if let Some(resource_name) = self.fonts.get(&font) {
            return resource_name.clone();
        }
        let reserved = self.fonts.values().cloned().collect::<Vec<_>>();
        let resource_name = self
            .document
            .available_resource_name(self.page_id, b"Font", "F", &reserved);
        self.fonts.insert(font, resource_name.clone());

        resource_name
    }
}

/// Looks up an attribute on the page or, failing that, on its closest ancestor in the page tree defining it.
fn inherited_attribute(
    document: &lopdf::Document,
    page_id: ObjectId,
    attribute: &[u8],
) -> Option<Object> {
    let mut node_id = page_id;
    for _ in 0..MAXIMUM_PAGE_TREE_DEPTH {
        let node = document.get_dictionary(node_id).ok()?;
        if let Ok(value) = node.get(attribute) {
            return Some(value.clone());
        }
        node_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
    }

    None
}

/// Returns a copy of the dictionary, following the reference if the object is an indirect one.
fn resolve_dictionary(
    document: &lopdf::Document,
    object: &Object,
) -> Result<Dictionary, ContextError> {
    match object {
        Object::Dictionary(dictionary) => Ok(dictionary.clone()),
        Object::Reference(object_id) => document
            .get_dictionary(*object_id)
            .cloned()
            .map_err(|error| {
                ContextError::with_error(
                    format!("Unable to resolve the dictionary {:?}", object_id),
                    &error,
                )
            }),
        other => Err(ContextError::with_context(format!(
            "Expected a dictionary, found {:?}",
            other
        ))),
    }
}

/// Encodes the text for a simple font using `WinAnsiEncoding`. The text is normalized in the NFC form first,
/// so that accented letters composed of multiple codepoints map to their single byte.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut character_buffer = [0; 4];
    text.nfc()
        .flat_map(|character| {
            let encoded_character = lopdf::Document::encode_text(
                Some("WinAnsiEncoding"),
                character.encode_utf8(&mut character_buffer),
            );
            if encoded_character.is_empty() {
                log::warn!(
                    "Unable to encode the character {:?} with the standard fonts",
                    character
                );
                vec![b'?']
            } else {
                encoded_character
            }
        })
        .collect()
}

/// Formats the given time so that it matches what the PDF specification expects.
/// An example of it is the following: D:20170505150224+02'00'.
fn to_pdf_timestamp_format(date: &OffsetDateTime) -> String {
    let offset = date.offset();
    let offset_sign = if offset.is_negative() { '-' } else { '+' };
    format!(
        "D:{:04}{:02}{:02}{:02}{:02}{:02}{offset_sign}{:02}'{:02}'",
        date.year(),
        u8::from(date.month()),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        offset.whole_hours().abs(),
        offset.minutes_past_hour().abs(),
    )
}
