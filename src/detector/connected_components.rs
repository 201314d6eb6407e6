//! Connected components of a binary mask
//! Finds external foreground regions with their outer contour, bounding box and area
use crate::models::{BinaryMask, BoundingBox, PointI, polygon_area};

/// Union-Find data structure
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    /// Create `n` singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
        }
    }

    /// Add a new singleton set and return its id
    pub fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    /// Representative of the set holding `x`
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression
        let mut cur = x;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets holding `x` and `y`
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            self.parent[root_x as usize] = root_y;
        }
    }
}

/// An external connected foreground component
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Outer boundary pixels, starting at the component's top-left pixel
    pub contour: Vec<PointI>,
    /// Tight bounding box
    pub bbox: BoundingBox,
    /// Area enclosed by the contour polygon
    pub area: f64,
    /// Number of foreground pixels in the component
    pub pixel_count: usize,
}

/// Offsets for 8-directional sweeping (x, y), counterclockwise from east
const NEIGHBORHOOD: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

struct ComponentStats {
    bbox: (usize, usize, usize, usize),
    start: (usize, usize),
    pixel_count: usize,
    external: bool,
}

/// Label 8-connected foreground components (two-pass union-find)
fn label_components(mask: &BinaryMask) -> (Vec<u32>, UnionFind) {
    let width = mask.width();
    let height = mask.height();

    let mut labels = vec![0u32; width * height];
    // Label 0 is background
    let mut uf = UnionFind::new(1);

    for y in 0..height {
        for x in 0..width {
            if !mask.get(x, y) {
                continue;
            }

            let mut neighbor_labels = [0u32; 4];
            let mut found = 0;

            // Left, upper-left, above, upper-right
            if x > 0 && mask.get(x - 1, y) {
                neighbor_labels[found] = labels[y * width + x - 1];
                found += 1;
            }
            if y > 0 {
                let up = (y - 1) * width;
                if x > 0 && mask.get(x - 1, y - 1) {
                    neighbor_labels[found] = labels[up + x - 1];
                    found += 1;
                }
                if mask.get(x, y - 1) {
                    neighbor_labels[found] = labels[up + x];
                    found += 1;
                }
                if x + 1 < width && mask.get(x + 1, y - 1) {
                    neighbor_labels[found] = labels[up + x + 1];
                    found += 1;
                }
            }

            let idx = y * width + x;
            if found == 0 {
                labels[idx] = uf.make_set();
            } else {
                let neighbors = &neighbor_labels[..found];
                let min_label = neighbors.iter().copied().min().unwrap_or(neighbors[0]);
                labels[idx] = min_label;
                for &l in neighbors {
                    if l != min_label {
                        uf.union(min_label, l);
                    }
                }
            }
        }
    }

    (labels, uf)
}

/// Background reachable from the frame edge (4-connected), i.e. not inside a hole
fn outside_background(mask: &BinaryMask) -> Vec<bool> {
    let width = mask.width();
    let height = mask.height();
    let mut outside = vec![false; width * height];
    let mut stack = Vec::new();

    let mut seed = |x: usize, y: usize, stack: &mut Vec<(usize, usize)>| {
        if !mask.get(x, y) && !outside[y * width + x] {
            outside[y * width + x] = true;
            stack.push((x, y));
        }
    };
    for x in 0..width {
        seed(x, 0, &mut stack);
        seed(x, height - 1, &mut stack);
    }
    for y in 0..height {
        seed(0, y, &mut stack);
        seed(width - 1, y, &mut stack);
    }

    while let Some((x, y)) = stack.pop() {
        let mut visit = |nx: usize, ny: usize| {
            let i = ny * width + nx;
            if !outside[i] && !mask.get(nx, ny) {
                outside[i] = true;
                stack.push((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y);
        }
        if x + 1 < width {
            visit(x + 1, y);
        }
        if y > 0 {
            visit(x, y - 1);
        }
        if y + 1 < height {
            visit(x, y + 1);
        }
    }

    outside
}

/// Trace the outer border of the component whose top-left pixel is `start`.
///
/// Suzuki-style border following: the first neighbour is searched clockwise
/// from west, every later step searches counterclockwise starting just past
/// the pixel we came from. The walk ends on the step from that first
/// neighbour back into `start`.
fn trace_outer_border(mask: &BinaryMask, start: (usize, usize)) -> Vec<PointI> {
    let is_fg = |p: PointI| p.x >= 0 && p.y >= 0 && mask.get(p.x as usize, p.y as usize);
    let step = |p: PointI, dir: usize| p.offset(NEIGHBORHOOD[dir].0, NEIGHBORHOOD[dir].1);

    let origin = PointI::new(start.0 as i32, start.1 as i32);
    let mut contour = Vec::new();

    let first_dir = (1..=8).map(|k| (12 - k) % 8).find(|&d| is_fg(step(origin, d)));
    let Some(first_dir) = first_dir else {
        // Isolated pixel
        contour.push(origin);
        return contour;
    };
    let last = step(origin, first_dir);

    let mut current = origin;
    let mut back_dir = first_dir;
    let limit = 4 * mask.width() * mask.height() + 8;

    for _ in 0..limit {
        let dir = (1..=8)
            .map(|k| (back_dir + k) % 8)
            .find(|&d| is_fg(step(current, d)))
            .unwrap_or(back_dir);
        let next = step(current, dir);

        contour.push(current);
        if current == last && next == origin {
            break;
        }

        back_dir = (dir + 4) % 8;
        current = next;
    }

    contour
}

/// Find external connected foreground regions of a mask.
///
/// Components enclosed by a hole of another component are not reported.
/// An empty mask yields an empty list.
pub fn find_external_regions(mask: &BinaryMask) -> Vec<Region> {
    let width = mask.width();
    let height = mask.height();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let (labels, mut uf) = label_components(mask);
    let outside = outside_background(mask);

    let mut stats: std::collections::HashMap<u32, ComponentStats> =
        std::collections::HashMap::new();
    let mut order = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let label = labels[y * width + x];
            if label == 0 {
                continue;
            }
            let root = uf.find(label);

            let touches_outside = x == 0
                || y == 0
                || x + 1 == width
                || y + 1 == height
                || outside[y * width + x - 1]
                || outside[y * width + x + 1]
                || outside[(y - 1) * width + x]
                || outside[(y + 1) * width + x];

            let entry = stats.entry(root).or_insert_with(|| {
                order.push(root);
                ComponentStats {
                    bbox: (x, y, x, y),
                    start: (x, y),
                    pixel_count: 0,
                    external: false,
                }
            });
            entry.bbox.0 = entry.bbox.0.min(x);
            entry.bbox.1 = entry.bbox.1.min(y);
            entry.bbox.2 = entry.bbox.2.max(x);
            entry.bbox.3 = entry.bbox.3.max(y);
            entry.pixel_count += 1;
            entry.external |= touches_outside;
        }
    }

    order
        .into_iter()
        .filter_map(|root| stats.remove(&root))
        .filter(|s| s.external)
        .map(|s| {
            let contour = trace_outer_border(mask, s.start);
            let (min_x, min_y, max_x, max_y) = s.bbox;
            Region {
                area: polygon_area(&contour),
                contour,
                bbox: BoundingBox::from_corners(min_x, min_y, max_x, max_y),
                pixel_count: s.pixel_count,
            }
        })
        .collect()
}
