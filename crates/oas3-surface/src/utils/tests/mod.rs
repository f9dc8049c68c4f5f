mod refs;
