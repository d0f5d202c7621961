//! Editing session - owns the current image, mosaic and overrides.
//!
//! Regeneration is split into `request` (which stamps the settings with a
//! generation number), `run` (the pure pipeline) and `commit`. A commit is
//! accepted only for the newest request, so a slow generation for old
//! settings can never replace the result of newer ones.
//!
//! User edits are kept in their own sparse layer. Every commit rebuilds the
//! override grid from the new mosaic and layers the edits back on top, so
//! untouched tiles always follow the latest settings.

mod debounce;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};

use std::path::Path;

use crate::error::{DiceError, Result};
use crate::mosaic::{self, Mosaic, OverrideCell, OverrideGrid, SourceImage, TileView};
use crate::types::Settings;

/// A settings snapshot stamped with its generation number.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    generation: u64,
    settings: Settings,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Outcome of [`Session::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The mosaic is now current.
    Applied,
    /// A newer request exists; the mosaic was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    image: Option<SourceImage>,
    mosaic: Option<Mosaic>,
    overrides: Option<OverrideGrid>,
    edits: Option<OverrideGrid>,
    requested: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with an image already loaded.
    pub fn with_image(image: SourceImage) -> Self {
        Self {
            image: Some(image),
            ..Default::default()
        }
    }

    /// Replace the source image. The current mosaic is kept until the next
    /// regeneration.
    pub fn set_image(&mut self, image: SourceImage) {
        self.image = Some(image);
    }

    /// Decode and load an image file. On failure the session is unchanged.
    pub fn load_image(&mut self, path: &Path) -> Result<()> {
        let image = SourceImage::open(path)?;
        self.set_image(image);
        Ok(())
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Stamp `settings` as the newest request.
    pub fn request(&mut self, settings: Settings) -> Ticket {
        self.requested += 1;
        Ticket {
            generation: self.requested,
            settings,
        }
    }

    /// Generate the mosaic for a ticket without touching session state.
    pub fn run(&self, ticket: &Ticket) -> Result<Mosaic> {
        let image = self.image.as_ref().ok_or_else(|| DiceError::Input {
            message: "No image has been loaded".to_string(),
            help: Some("Load an image before generating a mosaic".to_string()),
        })?;
        mosaic::generate(image, &ticket.settings)
    }

    /// Make `mosaic` current if `ticket` is still the newest request.
    ///
    /// The override grid is rebuilt from the new mosaic. User edits carry
    /// over when the dimensions are unchanged and are dropped otherwise.
    pub fn commit(&mut self, ticket: &Ticket, mosaic: Mosaic) -> Commit {
        if ticket.generation != self.requested {
            return Commit::Stale;
        }

        let (rows, cols) = mosaic.dimensions();
        let edits = match self.edits.take() {
            Some(edits) if edits.dimensions() == (rows, cols) => edits,
            _ => OverrideGrid::empty(rows, cols),
        };
        let base = OverrideGrid::initialize(mosaic.grid(), mosaic.colours());
        // Same dimensions by construction
        let overrides = base.overlay(&edits).unwrap_or(base);

        self.overrides = Some(overrides);
        self.edits = Some(edits);
        self.mosaic = Some(mosaic);
        Commit::Applied
    }

    /// Request, run and commit in one step.
    ///
    /// On error the previous mosaic and overrides are left as they were.
    pub fn regenerate(&mut self, settings: Settings) -> Result<&Mosaic> {
        let ticket = self.request(settings);
        let mosaic = self.run(&ticket)?;
        self.commit(&ticket, mosaic);
        self.mosaic.as_ref().ok_or_else(|| DiceError::input("No mosaic was produced"))
    }

    /// Apply a manual edit to one tile (0-based position).
    pub fn edit(&mut self, row: usize, col: usize, patch: OverrideCell) -> Result<()> {
        let (overrides, edits) = match (&self.overrides, &self.edits) {
            (Some(overrides), Some(edits)) => (overrides, edits),
            _ => {
                return Err(DiceError::Input {
                    message: "There is no mosaic to edit".to_string(),
                    help: Some("Generate a mosaic first".to_string()),
                })
            }
        };
        let updated = overrides.apply(row, col, patch)?;
        let edits = edits.apply(row, col, patch)?;
        self.overrides = Some(updated);
        self.edits = Some(edits);
        Ok(())
    }

    /// Replace the user edit layer, e.g. with edits read from a file.
    pub fn set_edits(&mut self, edits: OverrideGrid) -> Result<()> {
        let mosaic = self.mosaic.as_ref().ok_or_else(|| DiceError::input("There is no mosaic to edit"))?;
        let base = OverrideGrid::initialize(mosaic.grid(), mosaic.colours());
        let overrides = base.overlay(&edits)?;
        self.overrides = Some(overrides);
        self.edits = Some(edits);
        Ok(())
    }

    pub fn mosaic(&self) -> Option<&Mosaic> {
        self.mosaic.as_ref()
    }

    /// The full override grid: generated values plus user edits.
    pub fn overrides(&self) -> Option<&OverrideGrid> {
        self.overrides.as_ref()
    }

    /// Only the tiles the user has edited.
    pub fn edits(&self) -> Option<&OverrideGrid> {
        self.edits.as_ref()
    }

    /// Number of the newest request.
    pub fn generation(&self) -> u64 {
        self.requested
    }

    /// The current mosaic seen through its overrides.
    pub fn view(&self) -> Option<TileView<'_>> {
        let mosaic = self.mosaic.as_ref()?;
        TileView::new(mosaic, self.overrides.as_ref()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, FaceValue, Theme};
    use image::{Rgba, RgbaImage};

    fn image() -> SourceImage {
        SourceImage::from_rgba(RgbaImage::from_fn(40, 40, |x, _| {
            let level = (x * 6) as u8;
            Rgba([level, level, level, 255])
        }))
    }

    fn sized(width: u32, height: u32) -> Settings {
        Settings {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_image() {
        let mut session = Session::new();
        let result = session.regenerate(Settings::default());
        assert!(matches!(result, Err(DiceError::Input { .. })));
        assert!(session.mosaic().is_none());
    }

    #[test]
    fn test_first_commit_initialises_overrides() {
        let mut session = Session::with_image(image());
        session.regenerate(sized(10, 12)).unwrap();

        let overrides = session.overrides().unwrap();
        assert_eq!(overrides.dimensions(), (12, 10));
        assert_eq!(overrides.iter().count(), 120);
    }

    #[test]
    fn test_stale_commit_is_dropped() {
        let mut session = Session::with_image(image());

        let old = session.request(sized(10, 10));
        let new = session.request(sized(20, 20));

        let new_mosaic = session.run(&new).unwrap();
        assert_eq!(session.commit(&new, new_mosaic), Commit::Applied);

        // The slower, older generation finishes last
        let old_mosaic = session.run(&old).unwrap();
        assert_eq!(session.commit(&old, old_mosaic), Commit::Stale);

        assert_eq!(session.mosaic().unwrap().dimensions(), (20, 20));
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_failed_generation_keeps_previous() {
        let mut session = Session::with_image(image());
        session.regenerate(sized(10, 10)).unwrap();
        let before = session.mosaic().cloned();

        assert!(session.regenerate(sized(200, 200)).is_err());
        assert_eq!(session.mosaic().cloned(), before);
        assert_eq!(session.overrides().unwrap().dimensions(), (10, 10));
    }

    #[test]
    fn test_edits_survive_same_size_regeneration() {
        let mut session = Session::with_image(image());
        session.regenerate(sized(10, 10)).unwrap();
        session.edit(2, 3, OverrideCell::face(FaceValue::SIX)).unwrap();

        let mut settings = sized(10, 10);
        settings.contrast = 80;
        session.regenerate(settings).unwrap();
        assert_eq!(
            session.overrides().unwrap().get(2, 3).unwrap().face,
            Some(FaceValue::SIX)
        );

        // A new size throws the edits away
        session.regenerate(sized(11, 10)).unwrap();
        let overrides = session.overrides().unwrap();
        assert_eq!(overrides.dimensions(), (10, 11));
        let generated = session.mosaic().unwrap().grid().get(2, 3);
        assert_eq!(overrides.get(2, 3).unwrap().face, generated);
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut session = Session::with_image(image());
        assert!(session.edit(0, 0, OverrideCell::default()).is_err());

        session.regenerate(sized(10, 10)).unwrap();
        assert!(matches!(
            session.edit(10, 0, OverrideCell::face(FaceValue::ONE)),
            Err(DiceError::Input { .. })
        ));
    }

    #[test]
    fn test_view_reflects_edits() {
        let mut session = Session::with_image(image());
        let mut settings = sized(10, 10);
        settings.theme = Theme::Mixed;
        session.regenerate(settings).unwrap();
        session.edit(0, 0, OverrideCell::face(FaceValue::SIX)).unwrap();

        let view = session.view().unwrap();
        assert_eq!(view.cell(0, 0).unwrap().face, FaceValue::SIX);
    }

    #[test]
    fn test_set_edits_checks_dimensions() {
        let mut session = Session::with_image(image());
        session.regenerate(sized(10, 10)).unwrap();
        assert!(session.set_edits(OverrideGrid::empty(10, 11)).is_err());
        assert!(session.set_edits(OverrideGrid::empty(10, 10)).is_ok());
    }

    #[test]
    fn test_same_size_regeneration_shows_new_settings() {
        let mut session = Session::with_image(image());
        let mut settings = sized(10, 10);
        session.regenerate(settings.clone()).unwrap();
        let before: Vec<_> = session.view().unwrap().iter().collect();

        settings.theme = Theme::Black;
        settings.contrast = 90;
        session.regenerate(settings).unwrap();
        let mosaic = session.mosaic().unwrap().clone();
        let view = session.view().unwrap();

        for (r, c, cell) in view.iter() {
            assert_eq!(Some(cell.face), mosaic.grid().get(r, c));
            assert_eq!(cell.fill, mosaic.colours().get(cell.face));
        }
        let after: Vec<_> = view.iter().collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_edits_layer_over_regenerated_tiles() {
        let mut session = Session::with_image(image());
        session.regenerate(sized(10, 10)).unwrap();
        session.edit(0, 0, OverrideCell::fill(Colour::rgb(255, 0, 0))).unwrap();

        let mut settings = sized(10, 10);
        settings.theme = Theme::Black;
        session.regenerate(settings).unwrap();

        let view = session.view().unwrap();
        let edited = view.cell(0, 0).unwrap();
        assert_eq!(edited.fill, Colour::rgb(255, 0, 0));
        // The face is not edited, so it follows the new mosaic
        assert_eq!(Some(edited.face), session.mosaic().unwrap().grid().get(0, 0));
        assert_eq!(view.cell(5, 5).unwrap().fill, crate::mosaic::BLACK_DIE);
        assert_eq!(session.edits().unwrap().iter().count(), 1);
    }
}
