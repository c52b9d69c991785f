use std::fmt::{Display, Formatter, Result as FmtResult};

/// Top-level error for anything that crosses a layer boundary.
#[derive(Debug, Clone)]
pub enum AppError {
    Domain(DomainError),
    Infrastructure(InfrastructureError),
    Presentation(PresentationError),
}

#[derive(Debug, Clone)]
pub enum DomainError {
    InvalidLocation(String),
    InvalidWindow(String),
}

#[derive(Debug, Clone)]
pub enum InfrastructureError {
    Network(NetworkError),
    Parse(String),
}

#[derive(Debug, Clone)]
pub enum NetworkError {
    HttpRequestFailed(String),
    HttpStatus { url: String, status: u16 },
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub enum PresentationError {
    Serialization(String),
    Callback(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AppError::Domain(e) => write!(f, "Domain Error: {}", e),
            AppError::Infrastructure(e) => write!(f, "Infrastructure Error: {}", e),
            AppError::Presentation(e) => write!(f, "Presentation Error: {}", e),
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::InvalidLocation(msg) => write!(f, "Invalid location: {}", msg),
            DomainError::InvalidWindow(msg) => write!(f, "Invalid window: {}", msg),
        }
    }
}

impl Display for InfrastructureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            InfrastructureError::Network(e) => write!(f, "Network: {}", e),
            InfrastructureError::Parse(msg) => write!(f, "Parse: {}", msg),
        }
    }
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NetworkError::HttpRequestFailed(msg) => write!(f, "request failed: {}", msg),
            NetworkError::HttpStatus { url, status } => write!(f, "request to {} failed: {}", url, status),
            NetworkError::InvalidResponse(msg) => write!(f, "invalid response: {}", msg),
        }
    }
}

impl Display for PresentationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PresentationError::Serialization(msg) => write!(f, "Serialization: {}", msg),
            PresentationError::Callback(msg) => write!(f, "Callback: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for DomainError {}
impl std::error::Error for InfrastructureError {}
impl std::error::Error for NetworkError {}
impl std::error::Error for PresentationError {}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        AppError::Domain(error)
    }
}

impl From<InfrastructureError> for AppError {
    fn from(error: InfrastructureError) -> Self {
        AppError::Infrastructure(error)
    }
}

impl From<PresentationError> for AppError {
    fn from(error: PresentationError) -> Self {
        AppError::Presentation(error)
    }
}

impl From<NetworkError> for InfrastructureError {
    fn from(error: NetworkError) -> Self {
        InfrastructureError::Network(error)
    }
}

pub type NetworkResult<T> = Result<T, InfrastructureError>;
pub type AppResult<T> = Result<T, AppError>;
