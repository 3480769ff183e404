use crate::error::{ViewportError, ViewportResult};

/// Linear value <-> pixel mapping between a data domain and a pixel span.
///
/// Pixel spans are ordered from domain start to domain end, so a reversed
/// span (bottom-to-top for a y axis) inverts the mapping naturally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ViewportResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start > domain_end {
            return Err(ViewportError::InvalidData(
                "scale domain must be finite and ordered".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.domain_end - self.domain_start
    }

    pub fn domain_to_pixel(self, value: f64, pixel_span: (f64, f64)) -> ViewportResult<f64> {
        validate_pixel_span(pixel_span)?;
        if !value.is_finite() {
            return Err(ViewportError::InvalidData("value must be finite".to_owned()));
        }

        let (pixel_start, pixel_end) = pixel_span;
        let span = self.span();
        if span == 0.0 {
            return Ok(pixel_start);
        }
        let normalized = (value - self.domain_start) / span;
        Ok(pixel_start + normalized * (pixel_end - pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64, pixel_span: (f64, f64)) -> ViewportResult<f64> {
        validate_pixel_span(pixel_span)?;
        if !pixel.is_finite() {
            return Err(ViewportError::InvalidData("pixel must be finite".to_owned()));
        }

        let (pixel_start, pixel_end) = pixel_span;
        let normalized = (pixel - pixel_start) / (pixel_end - pixel_start);
        Ok(self.domain_start + normalized * self.span())
    }
}

fn validate_pixel_span((start, end): (f64, f64)) -> ViewportResult<()> {
    if !start.is_finite() || !end.is_finite() || start == end {
        return Err(ViewportError::InvalidData(
            "pixel span must be finite and non-empty".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::LinearScale;
    use approx::assert_relative_eq;

    #[test]
    fn inverted_span_maps_domain_start_to_bottom() {
        let scale = LinearScale::new(0.0, 100.0).expect("scale");
        let px = scale.domain_to_pixel(25.0, (400.0, 0.0)).expect("px");
        assert_relative_eq!(px, 300.0);
        let value = scale.pixel_to_domain(300.0, (400.0, 0.0)).expect("value");
        assert_relative_eq!(value, 25.0);
    }

    #[test]
    fn degenerate_domain_maps_every_pixel_to_its_start() {
        let scale = LinearScale::new(3.0, 3.0).expect("scale");
        assert_relative_eq!(scale.pixel_to_domain(120.0, (0.0, 200.0)).expect("v"), 3.0);
        assert_relative_eq!(scale.domain_to_pixel(3.0, (10.0, 200.0)).expect("px"), 10.0);
    }

    #[test]
    fn rejects_reversed_domain_and_empty_span() {
        assert!(LinearScale::new(5.0, 1.0).is_err());
        let scale = LinearScale::new(0.0, 1.0).expect("scale");
        assert!(scale.pixel_to_domain(1.0, (4.0, 4.0)).is_err());
    }
}
