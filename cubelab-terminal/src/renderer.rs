/// Software rasterizer that draws the cube demos into terminal cells
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cubelab_core::{Camera, DemoConfig, FrameMatrices, Mesh, Shading, Surface, Texture, Vertex};
use nalgebra::{Point2, Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 0.5;

/// A vertex after the vertex stage: screen position plus what the fragment stage needs
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    world: Point3<f32>,
    normal: Vector3<f32>,
    color: Vector3<f32>,
    tex_coord: Point2<f32>,
}

/// Frame state shared by every triangle of one draw
struct DrawContext<'a> {
    config: &'a DemoConfig,
    frame: FrameMatrices,
    texture: Option<&'a Texture>,
}

impl DrawContext<'_> {
    /// Base color before lighting
    fn base_color(&self, color: &Vector3<f32>, tex_coord: &Point2<f32>) -> Vector3<f32> {
        match (self.config.surface, self.texture) {
            (Surface::Texture, Some(texture)) => texture.sample(tex_coord),
            _ => *color,
        }
    }

    fn vertex_stage(&self, vertex: &Vertex, width: usize, height: usize) -> Option<ScreenVertex> {
        let (x, y, depth) = Camera::project_to_screen(
            &vertex.position,
            &self.frame.mvp,
            width as u32,
            height as u32,
        )?;
        let world = self.frame.model.transform_point(&vertex.position);
        let normal = (self.frame.normal * vertex.normal.to_homogeneous()).xyz();

        let color = match self.config.shading {
            Shading::PerVertex => {
                let base = self.base_color(&vertex.color, &vertex.tex_coord);
                self.config.lighting.shade(&base, &world, &normal)
            }
            Shading::PerFragment => vertex.color,
        };

        Some(ScreenVertex {
            x,
            y,
            depth,
            world,
            normal,
            color,
            tex_coord: vertex.tex_coord,
        })
    }

    fn fragment_stage(&self, v: &[ScreenVertex; 3], w: (f32, f32, f32)) -> Vector3<f32> {
        let color = v[0].color * w.0 + v[1].color * w.1 + v[2].color * w.2;
        match self.config.shading {
            Shading::PerVertex => color,
            Shading::PerFragment => {
                let world = Point3::from(
                    v[0].world.coords * w.0 + v[1].world.coords * w.1 + v[2].world.coords * w.2,
                );
                let normal = v[0].normal * w.0 + v[1].normal * w.1 + v[2].normal * w.2;
                let tex_coord = Point2::from(
                    v[0].tex_coord.coords * w.0
                        + v[1].tex_coord.coords * w.1
                        + v[2].tex_coord.coords * w.2,
                );
                let base = self.base_color(&color, &tex_coord);
                self.config.lighting.shade(&base, &world, &normal)
            }
        }
    }
}

/// Renderer that converts the cube demos to colored terminal characters
pub struct TerminalRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    color_buffer: Vec<Option<Vector3<f32>>>,
}

impl TerminalRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            color_buffer: vec![None; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Drawable area in square units, for the camera's aspect ratio
    pub fn viewport(&self) -> (u32, u32) {
        let rows = (self.height as f32 / CELL_ASPECT).round() as u32;
        (self.width as u32, rows)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.color_buffer.fill(None);
    }

    /// Shaded color of a cell, `None` where nothing was drawn
    pub fn cell(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.color_buffer[y * self.width + x]
    }

    pub fn render(
        &mut self,
        mesh: &Mesh,
        config: &DemoConfig,
        frame: FrameMatrices,
        texture: Option<&Texture>,
    ) {
        let context = DrawContext {
            config,
            frame,
            texture,
        };

        for triangle in mesh.triangles() {
            let projected: Option<Vec<ScreenVertex>> = triangle
                .vertices
                .iter()
                .map(|vertex| context.vertex_stage(vertex, self.width, self.height))
                .collect();

            // Triangles touching the eye plane are dropped whole
            let Some(projected) = projected else {
                continue;
            };
            let vertices = [projected[0], projected[1], projected[2]];

            self.rasterize_triangle(&context, &vertices);
        }
    }

    fn rasterize_triangle(&mut self, context: &DrawContext<'_>, v: &[ScreenVertex; 3]) {
        // Counter-clockwise in a y-down screen space has negative area
        let area = edge((v[0].x, v[0].y), (v[1].x, v[1].y), (v[2].x, v[2].y));
        if area >= 0.0 {
            return;
        }

        // Bounding box
        let min_x = v[0].x.min(v[1].x).min(v[2].x).floor() as i32;
        let max_x = v[0].x.max(v[1].x).max(v[2].x).ceil() as i32;
        let min_y = v[0].y.min(v[1].y).min(v[2].y).floor() as i32;
        let max_y = v[0].y.max(v[1].y).max(v[2].y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);

                let w0 = edge((v[1].x, v[1].y), (v[2].x, v[2].y), p) / area;
                let w1 = edge((v[2].x, v[2].y), (v[0].x, v[0].y), p) / area;
                let w2 = 1.0 - w0 - w1;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v[0].depth + w1 * v[1].depth + w2 * v[2].depth;
                if !(-1.0..=1.0).contains(&depth) {
                    continue;
                }

                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.color_buffer[idx] = Some(context.fragment_stage(v, (w0, w1, w2)));
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W, clear_color: [f32; 4]) -> std::io::Result<()> {
        let background = to_rgb(&Vector3::new(clear_color[0], clear_color[1], clear_color[2]));
        for y in 0..self.height {
            for x in 0..self.width {
                match self.cell(x, y) {
                    Some(color) => {
                        writer.queue(SetForegroundColor(to_rgb(&color)))?;
                        writer.queue(Print(luminosity_char(&color)))?;
                    }
                    None => {
                        writer.queue(SetForegroundColor(background))?;
                        writer.queue(Print(' '))?;
                    }
                }
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Twice the signed area of `(a, b, p)`
fn edge(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

fn luminosity_char(color: &Vector3<f32>) -> char {
    let luma = color.dot(&Vector3::new(0.2126, 0.7152, 0.0722)).clamp(0.0, 1.0);
    // Lit surfaces never fall back to the blank cell
    let index = 1 + (luma * (LUMINOSITY_RAMP.len() - 2) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

fn to_rgb(color: &Vector3<f32>) -> Color {
    let [r, g, b] = [color.x, color.y, color.z].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubelab_core::{DemoKind, RotationState};

    fn render(kind: DemoKind, rotation: RotationState) -> TerminalRenderer {
        let mut renderer = TerminalRenderer::new(80, 40);
        let (w, h) = renderer.viewport();
        let config = kind.config().with_aspect(w, h);
        let frame = FrameMatrices::compute(&config.camera, &rotation, config.model_scale);
        let texture = Texture::checkerboard(16, 4);
        renderer.render(&Mesh::cube(), &config, frame, Some(&texture));
        renderer
    }

    #[test]
    fn test_cube_covers_centre() {
        for kind in DemoKind::ALL {
            let renderer = render(kind, RotationState::zero());
            assert!(renderer.cell(40, 20).is_some(), "{kind} left the centre empty");
            assert!(renderer.cell(0, 0).is_none());
        }
    }

    #[test]
    fn test_colored_demo_shows_front_faces_only() {
        // From (5, 5, 5) the top, right and front faces are visible
        let renderer = render(DemoKind::Colored, RotationState::zero());
        let mut seen = Vec::new();
        for y in 0..renderer.height() {
            for x in 0..renderer.width() {
                if let Some(color) = renderer.cell(x, y) {
                    let rgb = to_rgb(&color);
                    if !seen.contains(&rgb) {
                        seen.push(rgb);
                    }
                }
            }
        }
        let red = Color::Rgb { r: 255, g: 0, b: 0 };
        let blue = Color::Rgb { r: 0, g: 0, b: 255 };
        let green = Color::Rgb { r: 0, g: 255, b: 0 };
        let yellow = Color::Rgb { r: 255, g: 255, b: 0 };
        assert!(seen.contains(&red) && seen.contains(&blue) && seen.contains(&green));
        assert!(!seen.contains(&yellow));
    }

    /// The cube's front face as a single triangle, wound as given
    fn front_triangle(indices: [u16; 3]) -> TerminalRenderer {
        let cube = Mesh::cube();
        let mut mesh = Mesh::new();
        mesh.vertices.extend_from_slice(&cube.vertices[16..19]);
        mesh.indices.extend_from_slice(&indices);

        let mut renderer = TerminalRenderer::new(80, 40);
        let (w, h) = renderer.viewport();
        let config = DemoKind::Colored.config().with_aspect(w, h);
        let frame = FrameMatrices::compute(&config.camera, &RotationState::zero(), 1.0);
        renderer.render(&mesh, &config, frame, None);
        renderer
    }

    fn covered_cells(renderer: &TerminalRenderer) -> usize {
        (0..renderer.height())
            .flat_map(|y| (0..renderer.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| renderer.cell(x, y).is_some())
            .count()
    }

    #[test]
    fn test_back_facing_triangle_is_culled() {
        assert!(covered_cells(&front_triangle([0, 1, 2])) > 0);
        assert_eq!(covered_cells(&front_triangle([0, 2, 1])), 0);
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let mut renderer = TerminalRenderer::new(4, 2);
        renderer.color_buffer[4] = Some(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(renderer.cell(0, 1), Some(Vector3::new(1.0, 0.0, 0.0)));
        assert_eq!(renderer.cell(4, 0), None);
        assert_eq!(renderer.cell(0, 2), None);
    }

    #[test]
    fn test_clear() {
        let mut renderer = render(DemoKind::PointFragment, RotationState::new(20.0, 30.0));
        renderer.clear();
        assert!(renderer.cell(40, 20).is_none());
    }

    #[test]
    fn test_luminosity_char() {
        assert_eq!(luminosity_char(&Vector3::zeros()), '.');
        assert_eq!(luminosity_char(&Vector3::new(1.0, 1.0, 1.0)), '@');
    }

    #[test]
    fn test_draw_writes_every_row() {
        let renderer = render(DemoKind::Directional, RotationState::zero());
        let mut out = Vec::new();
        renderer.draw(&mut out, [0.0, 0.0, 0.0, 1.0]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), renderer.height() - 1);
    }
}
