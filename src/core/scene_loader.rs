// Copyright @yucwang 2026

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::material::{Material, MaterialId};
use crate::core::scene::{Scene, SceneError};
use crate::core::texture::Texture;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::camera::Camera;
use crate::shapes::plane::Plane;
use crate::shapes::sphere::Sphere;
use crate::textures::checkerboard::CheckerboardTexture;
use crate::textures::image::{ImageTexture, TextureError};

#[derive(Debug, thiserror::Error)]
pub enum SceneLoadError {
    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedChar { ch: char, line: usize },
    #[error("line {line}: unknown token '{token}'")]
    UnknownToken { token: String, line: usize },
    #[error("line {line}: unterminated string")]
    UnclosedString { line: usize },
    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber { text: String, line: usize },
    #[error("line {line}: expected {expected}, found {found}")]
    Expected { expected: &'static str, found: String, line: usize },
    #[error("line {line}: background declared more than once")]
    DuplicateBackground { line: usize },
    #[error("line {line}: {source}")]
    Image { line: usize, source: TextureError },
    #[error("line {line}: blackbody colours are not supported")]
    UnsupportedBlackbody { line: usize },
    #[error("line {line}: {source}")]
    Scene { line: usize, source: SceneError },
    #[error("line {line}: scene has no camera")]
    MissingCamera { line: usize },
    #[error("failed to read scene {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

impl SceneLoadError {
    /// 1-based source line, if the error came from the scene text.
    pub fn line(&self) -> Option<usize> {
        match self {
            SceneLoadError::UnexpectedChar { line, .. }
            | SceneLoadError::UnknownToken { line, .. }
            | SceneLoadError::UnclosedString { line }
            | SceneLoadError::InvalidNumber { line, .. }
            | SceneLoadError::Expected { line, .. }
            | SceneLoadError::DuplicateBackground { line }
            | SceneLoadError::Image { line, .. }
            | SceneLoadError::UnsupportedBlackbody { line }
            | SceneLoadError::Scene { line, .. }
            | SceneLoadError::MissingCamera { line } => Some(*line),
            SceneLoadError::Io { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Keyword {
    Camera,
    Background,
    Material,
    Checks,
    Blackbody,
    Sphere,
    Plane,
    Diffuse,
    Specular,
    Emissive,
}

impl Keyword {
    fn parse(word: &str) -> Option<Self> {
        let keyword = match word {
            "camera" => Keyword::Camera,
            "background" => Keyword::Background,
            "material" => Keyword::Material,
            "checks" => Keyword::Checks,
            "blackbody" => Keyword::Blackbody,
            "sphere" => Keyword::Sphere,
            "plane" => Keyword::Plane,
            "diffuse" => Keyword::Diffuse,
            "specular" => Keyword::Specular,
            "emissive" => Keyword::Emissive,
            _ => return None,
        };
        Some(keyword)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Keyword::Camera => "camera",
            Keyword::Background => "background",
            Keyword::Material => "material",
            Keyword::Checks => "checks",
            Keyword::Blackbody => "blackbody",
            Keyword::Sphere => "sphere",
            Keyword::Plane => "plane",
            Keyword::Diffuse => "diffuse",
            Keyword::Specular => "specular",
            Keyword::Emissive => "emissive",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    LParen,
    RParen,
    Keyword(Keyword),
    Number(Float),
    Str(String),
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Keyword(keyword) => write!(f, "'{}'", keyword.as_str()),
            Token::Number(value) => write!(f, "number {}", value),
            Token::Str(text) => write!(f, "string \"{}\"", text),
            Token::End => write!(f, "end of input"),
        }
    }
}

fn is_number_char(c: u8) -> bool {
    c.is_ascii_digit() || matches!(c, b'.' | b',' | b'e' | b'E' | b'+' | b'-')
}

/// Cursor over the scene text. Tracks the current line for error reporting.
struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek_byte() {
            match c {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b'#' => {
                    while let Some(c) = self.peek_byte() {
                        if c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                c if c.is_ascii_whitespace() => self.pos += 1,
                _ => break,
            }
        }
    }

    fn take_while<F: Fn(u8) -> bool>(&mut self, pred: F) -> &'a str {
        let start = self.pos;
        while self.peek_byte().map_or(false, &pred) {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    /// Next token with the line it starts on.
    fn next_token(&mut self) -> Result<(Token, usize), SceneLoadError> {
        self.skip_whitespace_and_comments();
        let line = self.line;
        let c = match self.peek_byte() {
            Some(c) => c,
            None => return Ok((Token::End, line)),
        };

        let token = match c {
            b'(' => {
                self.pos += 1;
                Token::LParen
            }
            b')' => {
                self.pos += 1;
                Token::RParen
            }
            b'"' => {
                self.pos += 1;
                let text = self.take_while(|c| c != b'"' && c != b'\n');
                if self.peek_byte() != Some(b'"') {
                    return Err(SceneLoadError::UnclosedString { line });
                }
                self.pos += 1;
                Token::Str(text.to_string())
            }
            c if c == b'-' || c.is_ascii_digit() => {
                let text = self.take_while(is_number_char);
                let value = text.parse::<Float>().map_err(|_| SceneLoadError::InvalidNumber {
                    text: text.to_string(),
                    line,
                })?;
                Token::Number(value)
            }
            c if c.is_ascii_alphabetic() => {
                let word = self.take_while(|c| c.is_ascii_alphabetic());
                match Keyword::parse(word) {
                    Some(keyword) => Token::Keyword(keyword),
                    None => return Err(SceneLoadError::UnknownToken { token: word.to_string(), line }),
                }
            }
            _ => {
                let ch = self.src[self.pos..].chars().next().unwrap_or('\u{fffd}');
                return Err(SceneLoadError::UnexpectedChar { ch, line });
            }
        };
        Ok((token, line))
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<(Token, usize)>,
    base_dir: PathBuf,
}

impl<'a> Parser<'a> {
    fn next(&mut self) -> Result<(Token, usize), SceneLoadError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    fn peek(&mut self) -> Result<&(Token, usize), SceneLoadError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    fn expect(&mut self, want: Token, expected: &'static str) -> Result<(), SceneLoadError> {
        let (token, line) = self.next()?;
        if token == want {
            Ok(())
        } else {
            Err(SceneLoadError::Expected { expected, found: token.to_string(), line })
        }
    }

    fn number(&mut self) -> Result<Float, SceneLoadError> {
        match self.next()? {
            (Token::Number(value), _) => Ok(value),
            (token, line) => Err(SceneLoadError::Expected { expected: "a number", found: token.to_string(), line }),
        }
    }

    /// `( x y z )`
    fn vector(&mut self) -> Result<Vector3f, SceneLoadError> {
        self.expect(Token::LParen, "'('")?;
        let v = Vector3f::new(self.number()?, self.number()?, self.number()?);
        self.expect(Token::RParen, "')'")?;
        Ok(v)
    }

    fn color(&mut self) -> Result<RGBSpectrum, SceneLoadError> {
        if let (Token::Keyword(Keyword::Blackbody), line) = self.peek()? {
            return Err(SceneLoadError::UnsupportedBlackbody { line: *line });
        }
        Ok(RGBSpectrum::new(self.number()?, self.number()?, self.number()?))
    }

    fn texture(&mut self) -> Result<Texture, SceneLoadError> {
        let (token, line) = self.peek()?.clone();
        match token {
            Token::Keyword(Keyword::Checks) => {
                self.next()?;
                let scale = self.number()?;
                let even = self.color()?;
                let odd = self.color()?;
                Ok(Texture::Checkerboard(CheckerboardTexture::new(scale, even, odd)))
            }
            Token::Number(_) | Token::Keyword(Keyword::Blackbody) => Ok(Texture::Solid(self.color()?)),
            Token::Str(path) => {
                self.next()?;
                let path = self.base_dir.join(path);
                log::debug!("Loading image texture {}.", path.display());
                let image = ImageTexture::from_file(&path).map_err(|source| SceneLoadError::Image { line, source })?;
                Ok(Texture::Image(image))
            }
            other => Err(SceneLoadError::Expected { expected: "a texture", found: other.to_string(), line }),
        }
    }

    fn material(&mut self) -> Result<Material, SceneLoadError> {
        let (token, line) = self.next()?;
        let material = match token {
            Token::Keyword(Keyword::Diffuse) => Material::Diffuse(self.texture()?),
            Token::Keyword(Keyword::Specular) => Material::Specular(self.texture()?),
            Token::Keyword(Keyword::Emissive) => Material::Emissive(self.texture()?),
            other => {
                return Err(SceneLoadError::Expected {
                    expected: "a material type",
                    found: other.to_string(),
                    line,
                })
            }
        };
        Ok(material)
    }
}

/// Parses scene text. `aspect` is the output width over height; relative
/// image paths resolve against `base_dir`.
pub fn load_scene_from_str(src: &str, aspect: Float, base_dir: &Path) -> Result<Scene, SceneLoadError> {
    let mut parser = Parser { lexer: Lexer::new(src), peeked: None, base_dir: base_dir.to_path_buf() };
    let mut scene = Scene::new(Camera::new(Vector3f::zeros(), Vector3f::zeros(), Vector3f::zeros(), Vector3f::zeros()));
    let mut has_camera = false;
    let mut current_material = MaterialId::DEFAULT;

    let end_line = loop {
        let (token, line) = parser.next()?;
        match token {
            Token::End => break line,
            Token::Keyword(Keyword::Camera) => {
                let eye = parser.vector()?;
                let look_at = parser.vector()?;
                let up = parser.vector()?;
                let fov = parser.number()?;
                scene.set_camera(Camera::look_at(eye, look_at, up, fov, aspect));
                has_camera = true;
            }
            Token::Keyword(Keyword::Background) => {
                let texture = parser.texture()?;
                scene.set_background(texture).map_err(|source| match source {
                    SceneError::BackgroundAlreadySet => SceneLoadError::DuplicateBackground { line },
                    source => SceneLoadError::Scene { line, source },
                })?;
            }
            Token::Keyword(Keyword::Material) => {
                let material = parser.material()?;
                current_material = scene.add_material(material);
            }
            Token::Keyword(Keyword::Sphere) => {
                let center = parser.vector()?;
                let radius = parser.number()?;
                scene
                    .add_shape(Sphere::new(center, radius), current_material)
                    .map_err(|source| SceneLoadError::Scene { line, source })?;
            }
            Token::Keyword(Keyword::Plane) => {
                let normal = parser.vector()?;
                let offset = parser.number()?;
                scene
                    .add_shape(Plane::new(normal, offset), current_material)
                    .map_err(|source| SceneLoadError::Scene { line, source })?;
            }
            other => {
                return Err(SceneLoadError::Expected { expected: "a statement", found: other.to_string(), line });
            }
        }
    };

    if !has_camera {
        return Err(SceneLoadError::MissingCamera { line: end_line });
    }
    if !scene.has_background() {
        scene
            .set_background(Texture::solid(0.0, 0.0, 0.0))
            .map_err(|source| SceneLoadError::Scene { line: end_line, source })?;
    }

    log::info!(
        "Loaded scene: {} object(s), {} material(s), background {}.",
        scene.len(),
        scene.materials().len(),
        scene.background().describe()
    );
    for object in scene.objects() {
        log::debug!("  {} -> {}", object.shape.name(), scene.material(object.material).name());
    }
    Ok(scene)
}

pub fn load_scene<P: AsRef<Path>>(path: P, aspect: Float) -> Result<Scene, SceneLoadError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|source| SceneLoadError::Io { path: path.to_path_buf(), source })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    load_scene_from_str(&src, aspect, base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::Shape;

    fn load(src: &str) -> Result<Scene, SceneLoadError> {
        load_scene_from_str(src, 1.0, Path::new("."))
    }

    const CAMERA: &str = "camera (0 0 -5) (0 0 0) (0 1 0) 60\n";

    #[test]
    fn test_lexer_tokens() {
        let mut lexer = Lexer::new("# comment\n( -1.5e1 ) \"a b\" sphere");
        let mut tokens = Vec::new();
        loop {
            let (token, line) = lexer.next_token().unwrap();
            if token == Token::End {
                break;
            }
            tokens.push((token, line));
        }
        assert_eq!(tokens, vec![
            (Token::LParen, 2),
            (Token::Number(-15.0), 2),
            (Token::RParen, 2),
            (Token::Str("a b".to_string()), 2),
            (Token::Keyword(Keyword::Sphere), 2),
        ]);
    }

    #[test]
    fn test_load_full_scene() {
        let src = format!(
            "{}background 0.2 0.4 0.8\n\
             material emissive 4 4 4\n\
             sphere (0 2 0) 0.5\n\
             material diffuse checks 2 1 1 1 0 0 0\n\
             plane (0 1 0) -1   # floor\n\
             sphere (1 0 0) 1\n",
            CAMERA
        );
        let scene = load(&src).unwrap();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.materials().len(), 3);
        assert_eq!(scene.objects()[0].material, MaterialId(1));
        assert_eq!(scene.objects()[1].material, MaterialId(2));
        assert_eq!(scene.objects()[2].material, MaterialId(2));
        assert!(matches!(scene.objects()[1].shape, Shape::Plane(_)));
        assert!(matches!(scene.material(MaterialId(2)), Material::Diffuse(Texture::Checkerboard(_))));
        assert_eq!(scene.background(), &Texture::solid(0.2, 0.4, 0.8));
        assert!(scene.background_distribution().is_some());
        assert_eq!(scene.camera().eye, Vector3f::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_shapes_before_material_use_default() {
        let scene = load(&format!("{}sphere (0 0 0) 1\n", CAMERA)).unwrap();
        assert_eq!(scene.objects()[0].material, MaterialId::DEFAULT);
        assert_eq!(scene.background(), &Texture::solid(0.0, 0.0, 0.0));
        assert!(scene.background_distribution().is_some());
    }

    #[test]
    fn test_missing_camera() {
        let err = load("sphere (0 0 0) 1\n").unwrap_err();
        assert!(matches!(err, SceneLoadError::MissingCamera { .. }));
    }

    #[test]
    fn test_duplicate_background() {
        let err = load(&format!("{}background 0 0 0\nbackground 1 1 1\n", CAMERA)).unwrap_err();
        assert!(matches!(err, SceneLoadError::DuplicateBackground { line: 3 }));
    }

    #[test]
    fn test_lexical_errors_report_lines() {
        let err = load("camera\n  (0 0 0) $").unwrap_err();
        assert!(matches!(err, SceneLoadError::UnexpectedChar { ch: '$', line: 2 }));

        let err = load("\n\ncube (0 0 0) 1").unwrap_err();
        assert!(matches!(err, SceneLoadError::UnknownToken { ref token, line: 3 } if token == "cube"));

        let err = load(&format!("{}background \"sky.png\n\"", CAMERA)).unwrap_err();
        assert!(matches!(err, SceneLoadError::UnclosedString { line: 2 }));

        let err = load("sphere (0 0 0) 1.2.3").unwrap_err();
        assert!(matches!(err, SceneLoadError::InvalidNumber { ref text, line: 1 } if text == "1.2.3"));
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_grammar_errors() {
        let err = load("sphere 0 0 0 1").unwrap_err();
        assert!(matches!(err, SceneLoadError::Expected { expected: "'('", .. }));

        let err = load(&format!("{}material glossy 1 1 1", CAMERA)).unwrap_err();
        assert!(matches!(err, SceneLoadError::UnknownToken { .. }));

        let err = load(&format!("{}material sphere 1 1 1", CAMERA)).unwrap_err();
        assert!(matches!(err, SceneLoadError::Expected { expected: "a material type", line: 2, .. }));

        let err = load(&format!("{}material diffuse blackbody 5000", CAMERA)).unwrap_err();
        assert!(matches!(err, SceneLoadError::UnsupportedBlackbody { line: 2 }));

        let err = load("(").unwrap_err();
        assert!(matches!(err, SceneLoadError::Expected { expected: "a statement", .. }));
    }

    #[test]
    fn test_missing_image_reports_line() {
        let err = load_scene_from_str(
            &format!("{}\nbackground \"does-not-exist.png\"\n", CAMERA),
            1.0,
            Path::new("/nonexistent-dir"),
        )
        .unwrap_err();
        assert!(matches!(err, SceneLoadError::Image { line: 3, .. }));
    }

    #[test]
    fn test_load_scene_missing_file() {
        let err = load_scene("/nonexistent-dir/scene.txt", 1.0).unwrap_err();
        assert!(matches!(err, SceneLoadError::Io { .. }));
        assert_eq!(err.line(), None);
    }
}
