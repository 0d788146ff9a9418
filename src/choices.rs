//! Closed value sets for classroom fields. The stored form is always the
//! string label; handlers parse incoming params against these sets and
//! reject anything outside them.

/// Grade-level titles. Six levels: three junior, three senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRoomTitle {
    JuniorSecondarySchool1,
    JuniorSecondarySchool2,
    JuniorSecondarySchool3,
    SeniorSecondarySchool1,
    SeniorSecondarySchool2,
    SeniorSecondarySchool3,
}

impl ClassRoomTitle {
    pub const ALL: [ClassRoomTitle; 6] = [
        ClassRoomTitle::JuniorSecondarySchool1,
        ClassRoomTitle::JuniorSecondarySchool2,
        ClassRoomTitle::JuniorSecondarySchool3,
        ClassRoomTitle::SeniorSecondarySchool1,
        ClassRoomTitle::SeniorSecondarySchool2,
        ClassRoomTitle::SeniorSecondarySchool3,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClassRoomTitle::JuniorSecondarySchool1 => "Junior Secondary School 1",
            ClassRoomTitle::JuniorSecondarySchool2 => "Junior Secondary School 2",
            ClassRoomTitle::JuniorSecondarySchool3 => "Junior Secondary School 3",
            ClassRoomTitle::SeniorSecondarySchool1 => "Senior Secondary School 1",
            ClassRoomTitle::SeniorSecondarySchool2 => "Senior Secondary School 2",
            ClassRoomTitle::SeniorSecondarySchool3 => "Senior Secondary School 3",
        }
    }

    pub fn parse(label: &str) -> Option<ClassRoomTitle> {
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

/// Short classroom codes matching the titles above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRoomCode {
    Jss1,
    Jss2,
    Jss3,
    Sss1,
    Sss2,
    Sss3,
}

impl ClassRoomCode {
    pub const ALL: [ClassRoomCode; 6] = [
        ClassRoomCode::Jss1,
        ClassRoomCode::Jss2,
        ClassRoomCode::Jss3,
        ClassRoomCode::Sss1,
        ClassRoomCode::Sss2,
        ClassRoomCode::Sss3,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClassRoomCode::Jss1 => "JSS1",
            ClassRoomCode::Jss2 => "JSS2",
            ClassRoomCode::Jss3 => "JSS3",
            ClassRoomCode::Sss1 => "SSS1",
            ClassRoomCode::Sss2 => "SSS2",
            ClassRoomCode::Sss3 => "SSS3",
        }
    }

    pub fn parse(label: &str) -> Option<ClassRoomCode> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

/// Single-letter stream (track/section) labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    A,
    B,
    C,
    D,
    E,
}

impl Stream {
    pub const ALL: [Stream; 5] = [Stream::A, Stream::B, Stream::C, Stream::D, Stream::E];

    pub fn as_str(self) -> &'static str {
        match self {
            Stream::A => "A",
            Stream::B => "B",
            Stream::C => "C",
            Stream::D => "D",
            Stream::E => "E",
        }
    }

    pub fn parse(label: &str) -> Option<Stream> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_parse() {
        for t in ClassRoomTitle::ALL {
            assert_eq!(ClassRoomTitle::parse(t.as_str()), Some(t));
        }
        for c in ClassRoomCode::ALL {
            assert_eq!(ClassRoomCode::parse(c.as_str()), Some(c));
        }
        for s in Stream::ALL {
            assert_eq!(Stream::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        assert_eq!(ClassRoomTitle::parse("Primary School 1"), None);
        assert_eq!(ClassRoomTitle::parse("junior secondary school 1"), None);
        assert_eq!(ClassRoomCode::parse("JSS4"), None);
        assert_eq!(Stream::parse("F"), None);
        assert_eq!(Stream::parse(""), None);
    }
}
