pub mod alumnos;
pub mod aulas;
pub mod docentes;
pub mod grupos;
pub mod materias;
