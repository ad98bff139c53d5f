mod catalog;

pub use catalog::{
    builtin_exercises, Category, Exercise, ExerciseCatalog, ExerciseUpdate, NewExercise,
};
