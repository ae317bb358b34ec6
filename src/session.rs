//! The annotation session: single owner of all editor state.
//!
//! A rendering front-end feeds [`Message`]s into [`AnnotationSession::update`]
//! and redraws from the accessors whenever the returned [`Response`] says
//! something changed.

use crate::config::{EditorConfig, EditorSettings};
use crate::format::{ExportFile, FormatError, ImageInfo, PascalVocFormat};
use crate::handlers::{self, EditorState};
use crate::keybindings::KeyBindings;
use crate::message::{Message, Response};
use crate::model::{BoundingBox, Point, ShapeId, ShapeRef};
use crate::registry::ClassRegistry;
use crate::state::{EditFields, EditMenu, InteractionState};
use crate::store::ShapeStore;

/// Editor state for one image at a time.
#[derive(Debug, Clone)]
pub struct AnnotationSession {
    store: ShapeStore,
    registry: ClassRegistry,
    interaction: InteractionState,
    fields: EditFields,
    image: Option<ImageInfo>,
    bindings: KeyBindings,
    settings: EditorSettings,
    format: PascalVocFormat,
}

impl AnnotationSession {
    /// Session with default settings.
    pub fn new() -> Self {
        Self::from_config(&EditorConfig::default())
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::with_registry(config, ClassRegistry::new())
    }

    /// Session whose generated label colours are reproducible.
    pub fn with_seed(config: &EditorConfig, seed: u64) -> Self {
        Self::with_registry(config, ClassRegistry::with_seed(seed))
    }

    fn with_registry(config: &EditorConfig, mut registry: ClassRegistry) -> Self {
        for class in &config.classes {
            registry.add_class(class.name.trim(), class.color.clone());
        }
        Self {
            store: ShapeStore::with_min_box_size(config.editor.min_box_size),
            registry,
            interaction: InteractionState::Idle,
            fields: EditFields {
                label: String::new(),
                color: config.editor.default_color.clone(),
            },
            image: None,
            bindings: config.keybindings.clone(),
            settings: config.editor.clone(),
            format: PascalVocFormat::with_options(config.preferences.export_options()),
        }
    }

    fn editor(&mut self) -> EditorState<'_> {
        EditorState {
            store: &mut self.store,
            registry: &mut self.registry,
            interaction: &mut self.interaction,
            fields: &mut self.fields,
            close_radius: self.settings.close_radius,
        }
    }

    /// Process one input event.
    pub fn update(&mut self, message: Message) -> Response {
        match message {
            Message::Pointer(msg) => handlers::handle_pointer(msg, &mut self.editor()),
            Message::Shape(msg) => handlers::handle_shape(msg, &mut self.editor()),
            Message::Draw(msg) => handlers::handle_draw(msg, &mut self.editor()),
            Message::Menu(msg) => handlers::handle_menu(msg, &mut self.editor()),
            Message::Navigate(direction) => {
                handlers::handle_navigation(direction, &mut self.editor())
            }
            Message::KeyDown(key) => {
                let bindings = self.bindings.clone();
                handlers::handle_key(key, &bindings, &mut self.editor())
            }
            Message::ImageChanged(info) => self.set_image(info),
        }
    }

    /// Switch to another image. Shapes and drafts are dropped; label
    /// colours and reusable classes stay.
    fn set_image(&mut self, info: ImageInfo) -> Response {
        log::info!(
            "🖼️ Image changed to '{}' ({}x{}), dropping {} shapes",
            info.reference,
            info.width(),
            info.height(),
            self.store.len()
        );
        self.store.clear();
        self.interaction = InteractionState::Idle;
        self.fields.label.clear();
        self.image = Some(info);
        Response::Changed
    }

    /// Serialize the current shapes as the `annotations.xml` download.
    pub fn export(&self) -> Result<ExportFile, FormatError> {
        self.format.export_file(&self.store, &self.export_image())
    }

    /// Just the XML text of [`Self::export`].
    pub fn export_xml(&self) -> Result<String, FormatError> {
        self.format.export(&self.store, &self.export_image())
    }

    fn export_image(&self) -> ImageInfo {
        self.image
            .clone()
            .unwrap_or_else(|| ImageInfo::unloaded(""))
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Current contents of the edit menu's label and colour inputs.
    pub fn fields(&self) -> &EditFields {
        &self.fields
    }

    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.interaction.selected_id()
    }

    pub fn selected_shape(&self) -> Option<ShapeRef<'_>> {
        self.store.find_shape(self.selected_id()?)
    }

    /// Position of the selection in the combined order.
    pub fn selected_index(&self) -> Option<usize> {
        self.interaction.selection().map(|s| s.index)
    }

    pub fn open_menu(&self) -> Option<&EditMenu> {
        self.interaction.open_menu()
    }

    /// Box being dragged out, un-normalized.
    pub fn box_draft(&self) -> Option<&BoundingBox> {
        match &self.interaction {
            InteractionState::DrawingBox(draft) => Some(draft),
            _ => None,
        }
    }

    /// Polygon draft points plus the cursor, for the rubber-band line.
    pub fn polygon_preview(&self) -> Option<Vec<Point>> {
        match &self.interaction {
            InteractionState::DrawingPolygon(draft) => Some(draft.preview()),
            _ => None,
        }
    }

    /// True while the cursor is close enough to the first polygon point to
    /// close it.
    pub fn closing_hint(&self) -> bool {
        match &self.interaction {
            InteractionState::DrawingPolygon(draft) => {
                draft.closing_hint(self.settings.close_radius)
            }
            _ => false,
        }
    }

    /// Reusable classes for the edit menu.
    pub fn classes(&self) -> &[String] {
        self.registry.known_labels()
    }
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new()
    }
}
