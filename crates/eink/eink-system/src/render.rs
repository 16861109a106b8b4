//! Rendering system that converts layout trees to embedded-graphics primitives
//!
//! This module provides the rendering abstraction that takes computed layouts
//! and draws them to any `DrawTarget` from embedded-graphics.
//!
//! # Architecture
//!
//! - `Renderable` trait: Core abstraction for anything that can be rendered
//! - Helper functions: Background rendering, tree rendering
//! - Integration: Works with embedded-graphics primitives
//!
//! # Example
//!
//! ```no_run
//! use eink_system::render::*;
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::pixelcolor::Gray4;
//!
//! # struct MyDisplay;
//! # impl DrawTarget for MyDisplay {
//! #     type Color = Gray4;
//! #     type Error = core::convert::Infallible;
//! #     fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
//! #     where I: IntoIterator<Item = Pixel<Self::Color>> { Ok(()) }
//! # }
//! # impl OriginDimensions for MyDisplay {
//! #     fn size(&self) -> Size { Size::new(64, 64) }
//! # }
//! # let mut display = MyDisplay;
//! # let layout_result = LayoutResult::new(Point::zero(), Size::zero());
//!
//! // Render a computed layout to display
//! render_layout_tree(&layout_result, Point::zero(), &mut display)?;
//! # Ok::<(), core::convert::Infallible>(())
//! ```

use embedded_graphics::{
    pixelcolor::Gray4,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use heapless::Vec;

#[cfg(feature = "std")]
use std::boxed::Box;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// Maximum number of child layouts supported in a single container
pub const MAX_CHILDREN: usize = 32;

/// Result of a layout computation
///
/// Contains the position and size of a layout node, along with
/// any child layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Position of this layout node (relative to parent)
    pub position: Point,
    /// Size of this layout node
    pub size: Size,
    /// Child layout nodes (boxed to avoid infinite recursion)
    pub children: Vec<Box<LayoutResult>, MAX_CHILDREN>,
}

impl LayoutResult {
    /// Create a new layout result
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            children: Vec::new(),
        }
    }

    /// Create a layout result with children
    pub fn with_children(
        position: Point,
        size: Size,
        children: Vec<Box<LayoutResult>, MAX_CHILDREN>,
    ) -> Self {
        Self {
            position,
            size,
            children,
        }
    }

    /// Add a child layout
    #[allow(clippy::result_large_err)]
    pub fn add_child(&mut self, child: LayoutResult) -> Result<(), LayoutResult> {
        self.children.push(Box::new(child)).map_err(|boxed| *boxed)
    }

    /// Get the bounds rectangle (position + size)
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.position, self.size)
    }

    /// Get absolute bounds (accounting for offset)
    // SAFETY: position and offset are display coordinates; their sum is well within i32 range.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn absolute_bounds(&self, offset: Point) -> Rectangle {
        Rectangle::new(self.position + offset, self.size)
    }
}

/// Trait for types that can be rendered to a display
///
/// This is the core abstraction for the rendering system. Any type
/// that implements this trait can be drawn to an embedded-graphics
/// `DrawTarget`.
pub trait Renderable {
    /// Render this element to the display at the given offset
    ///
    /// # Parameters
    ///
    /// - `display`: The target display to render to
    /// - `offset`: The absolute offset to render at (for nested layouts)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use eink_system::render::*;
    /// use embedded_graphics::prelude::*;
    /// use embedded_graphics::pixelcolor::Gray4;
    ///
    /// # struct MyDisplay;
    /// # impl DrawTarget for MyDisplay {
    /// #     type Color = Gray4;
    /// #     type Error = core::convert::Infallible;
    /// #     fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    /// #     where I: IntoIterator<Item = Pixel<Self::Color>> { Ok(()) }
    /// # }
    /// # impl OriginDimensions for MyDisplay {
    /// #     fn size(&self) -> Size { Size::new(64, 64) }
    /// # }
    /// # struct MyRenderable;
    /// # impl Renderable for MyRenderable {
    /// #     fn render<D: DrawTarget<Color = Gray4>>(&self, display: &mut D, offset: Point) -> Result<(), D::Error> {
    /// #         Ok(())
    /// #     }
    /// # }
    /// # let mut display = MyDisplay;
    /// # let renderable = MyRenderable;
    ///
    /// renderable.render(&mut display, Point::zero())?;
    /// # Ok::<(), core::convert::Infallible>(())
    /// ```
    fn render<D: DrawTarget<Color = Gray4>>(
        &self,
        display: &mut D,
        offset: Point,
    ) -> Result<(), D::Error>;
}

/// Render a background color in a rectangle
///
/// This is a helper function for rendering solid backgrounds.
///
/// # Parameters
///
/// - `rect`: The rectangle to fill
/// - `color`: The grayscale color to use
/// - `display`: The target display
///
/// # Example
///
/// ```no_run
/// use eink_system::render::*;
/// use embedded_graphics::prelude::*;
/// use embedded_graphics::primitives::Rectangle;
/// use embedded_graphics::pixelcolor::Gray4;
/// use embedded_graphics::pixelcolor::GrayColor;
///
/// # struct MyDisplay;
/// # impl DrawTarget for MyDisplay {
/// #     type Color = Gray4;
/// #     type Error = core::convert::Infallible;
/// #     fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
/// #     where I: IntoIterator<Item = Pixel<Self::Color>> { Ok(()) }
/// # }
/// # impl OriginDimensions for MyDisplay {
/// #     fn size(&self) -> Size { Size::new(64, 64) }
/// # }
/// # let mut display = MyDisplay;
///
/// let rect = Rectangle::new(Point::new(10, 10), Size::new(100, 50));
/// render_background(rect, Gray4::WHITE, &mut display)?;
/// # Ok::<(), core::convert::Infallible>(())
/// ```
pub fn render_background<D: DrawTarget<Color = Gray4>>(
    rect: Rectangle,
    color: Gray4,
    display: &mut D,
) -> Result<(), D::Error> {
    let style = PrimitiveStyle::with_fill(color);
    rect.into_styled(style).draw(display)?;
    Ok(())
}

/// Render a layout tree to the display
///
/// This function recursively renders a layout tree, including all children.
/// It applies offsets and handles clipping to ensure elements don't render
/// outside their bounds.
///
/// # Parameters
///
/// - `layout`: The layout result to render
/// - `offset`: The absolute offset to render at
/// - `display`: The target display
///
/// # Example
///
/// ```no_run
/// use eink_system::render::*;
/// use embedded_graphics::prelude::*;
/// use embedded_graphics::pixelcolor::Gray4;
///
/// # struct MyDisplay;
/// # impl DrawTarget for MyDisplay {
/// #     type Color = Gray4;
/// #     type Error = core::convert::Infallible;
/// #     fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
/// #     where I: IntoIterator<Item = Pixel<Self::Color>> { Ok(()) }
/// # }
/// # impl OriginDimensions for MyDisplay {
/// #     fn size(&self) -> Size { Size::new(64, 64) }
/// # }
/// # let mut display = MyDisplay;
/// # let layout = LayoutResult::new(Point::zero(), Size::zero());
///
/// render_layout_tree(&layout, Point::zero(), &mut display)?;
/// # Ok::<(), core::convert::Infallible>(())
/// ```
#[allow(clippy::only_used_in_recursion)]
// SAFETY: position and offset are display coordinates; their sum is well within i32 range.
#[allow(clippy::arithmetic_side_effects)]
pub fn render_layout_tree<D: DrawTarget<Color = Gray4>>(
    layout: &LayoutResult,
    offset: Point,
    display: &mut D,
) -> Result<(), D::Error> {
    // Calculate absolute position
    let absolute_position = layout.position + offset;

    // Render children with updated offset
    for child in layout.children.iter() {
        render_layout_tree(child.as_ref(), absolute_position, display)?;
    }

    Ok(())
}

/// Render a layout tree with background color
///
/// Similar to `render_layout_tree` but also renders a background color
/// before rendering children.
///
/// # Parameters
///
/// - `layout`: The layout result to render
/// - `offset`: The absolute offset to render at
/// - `background`: Optional background color to render
/// - `display`: The target display
///
/// # Example
///
/// ```no_run
/// use eink_system::render::*;
/// use embedded_graphics::prelude::*;
/// use embedded_graphics::pixelcolor::Gray4;
///
/// # struct MyDisplay;
/// # impl DrawTarget for MyDisplay {
/// #     type Color = Gray4;
/// #     type Error = core::convert::Infallible;
/// #     fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
/// #     where I: IntoIterator<Item = Pixel<Self::Color>> { Ok(()) }
/// # }
/// # impl OriginDimensions for MyDisplay {
/// #     fn size(&self) -> Size { Size::new(64, 64) }
/// # }
/// # let mut display = MyDisplay;
/// # let layout = LayoutResult::new(Point::zero(), Size::zero());
///
/// render_layout_with_background(
///     &layout,
///     Point::zero(),
///     Some(Gray4::WHITE),
///     &mut display
/// )?;
/// # Ok::<(), core::convert::Infallible>(())
/// ```
pub fn render_layout_with_background<D: DrawTarget<Color = Gray4>>(
    layout: &LayoutResult,
    offset: Point,
    background: Option<Gray4>,
    display: &mut D,
) -> Result<(), D::Error> {
    // Render background if set
    if let Some(color) = background {
        let bounds = layout.absolute_bounds(offset);
        render_background(bounds, color, display)?;
    }

    // Render children
    render_layout_tree(layout, offset, display)?;

    Ok(())
}

/// Check if a rectangle is within bounds (for clipping)
///
/// This helper function checks if a rectangle is completely outside
/// the clipping bounds, allowing early rejection of offscreen elements.
///
/// # Parameters
///
/// - `rect`: The rectangle to check
/// - `clip_bounds`: The clipping bounds
///
/// # Returns
///
/// `true` if the rectangle intersects with the clip bounds, `false` otherwise
///
/// # Example
///
/// ```
/// use eink_system::render::*;
/// use embedded_graphics::prelude::*;
/// use embedded_graphics::primitives::Rectangle;
///
/// let rect = Rectangle::new(Point::new(10, 10), Size::new(50, 50));
/// let clip = Rectangle::new(Point::zero(), Size::new(100, 100));
///
/// assert!(is_visible(rect, clip));
///
/// let offscreen = Rectangle::new(Point::new(200, 200), Size::new(50, 50));
/// assert!(!is_visible(offscreen, clip));
/// ```
// SAFETY: coordinate arithmetic here adds i32 positions and i32-cast pixel sizes.
// Display dimensions (max ~4000px) added to typical screen coordinates are far from i32::MAX.
#[allow(clippy::arithmetic_side_effects)]
pub fn is_visible(rect: Rectangle, clip_bounds: Rectangle) -> bool {
    let rect_right = rect.top_left.x + rect.size.width as i32;
    let rect_bottom = rect.top_left.y + rect.size.height as i32;
    let clip_right = clip_bounds.top_left.x + clip_bounds.size.width as i32;
    let clip_bottom = clip_bounds.top_left.y + clip_bounds.size.height as i32;

    // Check if rectangles intersect
    !(rect.top_left.x >= clip_right
        || rect_right <= clip_bounds.top_left.x
        || rect.top_left.y >= clip_bottom
        || rect_bottom <= clip_bounds.top_left.y)
}
