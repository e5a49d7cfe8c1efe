/// Width and height of a rectangular screen object.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size<Num: num_traits::Num + Copy = f64> {
    width: Num,
    height: Num,
}

impl<Num: num_traits::Num + Copy> Size<Num> {
    /// Creates a new size.
    pub fn new(width: Num, height: Num) -> Self {
        Self { width, height }
    }

    /// Width.
    pub fn width(&self) -> Num {
        self.width
    }

    /// Half of the width, rounded down for integer sizes.
    pub fn half_width(&self) -> Num {
        self.width / (Num::one() + Num::one())
    }

    /// Height.
    pub fn height(&self) -> Num {
        self.height
    }
}
