use super::DomainError;

/// Teacher-assigned grade, a whole number in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    pub fn new(value: u16) -> Result<Self, DomainError> {
        if value <= u16::from(Self::MAX) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::InvalidGrade(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Grade {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u16> for Grade {
    type Error = DomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(value: Grade) -> Self {
        value.value()
    }
}

#[cfg(test)]
mod tests {
    use super::Grade;

    #[test]
    fn valid_grade_is_created() {
        let grade = Grade::new(100).expect("100 should be valid");

        assert_eq!(grade.value(), 100);
    }

    #[test]
    fn invalid_grade_is_rejected() {
        let err = Grade::new(101).expect_err("101 should be rejected");

        assert_eq!(
            err.to_string(),
            "invalid grade: 101. grade must be in [0, 100]"
        );
    }
}
