use rocket::http::ContentType;

/// The image formats that can be uploaded into and listed from a folder
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum ImageType {
    Jpeg,
    Png,
    Gif,
    Webp,
    Svg,
}

impl ImageType {
    /// matches a file extension, with or without the leading `.`, case-insensitively
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');
        Self::from_token(&extension.to_ascii_lowercase())
    }

    /// matches a declared content type. Only `image/*` types are accepted, and the subtype has any
    /// structured syntax suffix stripped first, so `image/svg+xml` counts as svg
    pub fn from_content_type(content_type: &ContentType) -> Option<Self> {
        if content_type.top() != "image" {
            return None;
        }
        let sub = content_type.sub().as_str().to_ascii_lowercase();
        let sub = sub.split('+').next().unwrap_or_default();
        Self::from_token(sub)
    }

    /// whether the passed file name ends in one of the allowed image extensions
    pub fn is_image_file_name(file_name: &str) -> bool {
        std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .is_some()
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::http::ContentType;

    use super::ImageType;

    #[test]
    fn from_extension_ignores_case_and_dot() {
        assert_eq!(Some(ImageType::Jpeg), ImageType::from_extension(".JPG"));
        assert_eq!(Some(ImageType::Jpeg), ImageType::from_extension("jpeg"));
        assert_eq!(Some(ImageType::Webp), ImageType::from_extension("WebP"));
        assert_eq!(None, ImageType::from_extension("txt"));
        assert_eq!(None, ImageType::from_extension(""));
    }

    #[test]
    fn from_content_type_requires_image_top_level() {
        assert_eq!(Some(ImageType::Png), ImageType::from_content_type(&ContentType::PNG));
        assert_eq!(Some(ImageType::Svg), ImageType::from_content_type(&ContentType::SVG));
        assert_eq!(None, ImageType::from_content_type(&ContentType::Plain));
        assert_eq!(
            None,
            ImageType::from_content_type(&ContentType::new("application", "png"))
        );
    }

    #[test]
    fn is_image_file_name_checks_extension_only() {
        assert!(ImageType::is_image_file_name("beach.PNG"));
        assert!(ImageType::is_image_file_name("my.trip.gif"));
        assert!(!ImageType::is_image_file_name("notes.txt"));
        assert!(!ImageType::is_image_file_name("png"));
        assert!(!ImageType::is_image_file_name(".bashrc"));
    }
}
